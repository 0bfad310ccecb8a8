#![allow(dead_code)]

use split_core::{
    domain::{ParticipantId, SplitStrategy},
    split::PendingUpdate,
    SplitSession,
};

/// Builds a session with the given roster, returning ids in roster order.
pub fn session_with(names: &[&str]) -> (SplitSession, Vec<ParticipantId>) {
    let mut session = SplitSession::new();
    let ids = names
        .iter()
        .map(|name| session.add_participant(*name))
        .collect();
    (session, ids)
}

/// Fills name, amount, strategy, and payer of the pending expense.
pub fn enter_expense(
    session: &mut SplitSession,
    name: &str,
    amount: &str,
    strategy: SplitStrategy,
    payer: ParticipantId,
) {
    for update in [
        PendingUpdate::SetName(name.into()),
        PendingUpdate::SetAmountText(amount.into()),
        PendingUpdate::SetStrategy(strategy),
        PendingUpdate::SetPayer {
            participant: payer,
            is_payer: true,
        },
    ] {
        session.update_pending(update).expect("pending update");
    }
}

pub fn balances(session: &SplitSession, ids: &[ParticipantId]) -> Vec<i64> {
    ids.iter()
        .map(|id| {
            session
                .ledger()
                .balance_of(*id)
                .expect("participant in ledger")
                .value()
        })
        .collect()
}
