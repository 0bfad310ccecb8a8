//! Command handlers for the split shell.

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::core::SplitSession;
use crate::domain::SplitStrategy;
use crate::money::{format_grouped, parse_amount_with, Amount};
use crate::split::PendingUpdate;
use crate::utils::build_info;

pub(crate) fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::default();
    for entry in [
        CommandEntry::new(
            "help",
            "Show commands or usage for one command",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("add", "Add a participant", "add <name>", cmd_add),
        CommandEntry::new(
            "remove",
            "Remove a participant with no recorded expenses",
            "remove <who>",
            cmd_remove,
        ),
        CommandEntry::new("people", "List participants", "people", cmd_people),
        CommandEntry::new(
            "name",
            "Set the pending expense name",
            "name <text>",
            cmd_name,
        ),
        CommandEntry::new(
            "amount",
            "Set the pending expense total",
            "amount <value>",
            cmd_amount,
        ),
        CommandEntry::new(
            "plus",
            "Add to the pending expense total",
            "plus <value>",
            cmd_plus,
        ),
        CommandEntry::new(
            "strategy",
            "Choose how the total is divided",
            "strategy <equal|custom>",
            cmd_strategy,
        ),
        CommandEntry::new(
            "include",
            "Include participants in the split",
            "include <who>...",
            cmd_include,
        ),
        CommandEntry::new(
            "exclude",
            "Leave participants out of the split",
            "exclude <who>...",
            cmd_exclude,
        ),
        CommandEntry::new(
            "payer",
            "Mark who paid, or `off` to clear",
            "payer <who> [off]",
            cmd_payer,
        ),
        CommandEntry::new(
            "custom",
            "Set a fixed amount for one participant",
            "custom <who> <value>",
            cmd_custom,
        ),
        CommandEntry::new(
            "pending",
            "Show the expense being entered",
            "pending",
            cmd_pending,
        ),
        CommandEntry::new("commit", "Record the pending expense", "commit", cmd_commit),
        CommandEntry::new("ledger", "Show everyone's balance", "ledger", cmd_ledger),
        CommandEntry::new("log", "Show recorded expenses", "log", cmd_log),
        CommandEntry::new("reset", "Discard the pending expense", "reset", cmd_reset),
        CommandEntry::new(
            "config",
            "Show or change settings",
            "config [max|separator|strategy <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build information", "version", cmd_version),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ] {
        registry.register(entry);
    }
    registry.alias("quit", "exit");
    registry.alias("balances", "ledger");
    registry.alias("history", "log");
    registry.alias("roster", "people");
    registry
}

fn usage(ctx: &ShellContext, command: &str) -> CommandError {
    let usage = ctx
        .registry()
        .get(command)
        .map(|entry| entry.usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

fn cmd_help(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = ctx
            .registry()
            .get(&name.to_lowercase())
            .ok_or_else(|| CommandError::InvalidArguments(format!("unknown command `{}`", name)))?;
        output::info(format!("{} - {}", entry.usage, entry.description));
        return Ok(());
    }
    output::section("Commands");
    for entry in ctx.registry().list() {
        output::line(format!("  {:<10} {}", entry.name, entry.description));
    }
    Ok(())
}

fn cmd_add(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    if name.trim().is_empty() {
        return Err(usage(ctx, "add"));
    }
    ctx.session_mut().add_participant(name.trim());
    output::success(format!(
        "Added {} as #{}",
        name.trim(),
        ctx.session().roster().len()
    ));
    Ok(())
}

fn cmd_remove(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [who] = args else {
        return Err(usage(ctx, "remove"));
    };
    let id = ctx.resolve_participant(who)?;
    let removed = ctx.session_mut().remove_participant(id)?;
    output::success(format!("Removed {}", removed.name));
    Ok(())
}

fn cmd_people(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Participants");
    let roster = ctx.session().roster();
    if roster.is_empty() {
        output::info("No participants yet. Use `add <name>`.");
    }
    for (index, participant) in roster.iter().enumerate() {
        output::line(format!("{:>3}. {}", index + 1, participant.name));
    }
    Ok(())
}

fn cmd_name(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    ctx.session_mut()
        .update_pending(PendingUpdate::SetName(name.clone()))?;
    output::success(format!("Expense name set to `{}`", name));
    Ok(())
}

fn cmd_amount(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage(ctx, "amount"));
    }
    let pending = ctx
        .session_mut()
        .update_pending(PendingUpdate::SetAmountText(args.concat()))?;
    output::success(format!("Amount set to {}", pending.amount));
    Ok(())
}

fn cmd_plus(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [value] = args else {
        return Err(usage(ctx, "plus"));
    };
    let increment = parse_amount_with(&ctx.session().config().locale(), value);
    let pending = ctx
        .session_mut()
        .update_pending(PendingUpdate::AddAmount(increment))?;
    output::success(format!("Amount is now {}", pending.amount));
    Ok(())
}

fn cmd_strategy(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [value] = args else {
        return Err(usage(ctx, "strategy"));
    };
    let strategy: SplitStrategy = value.parse().map_err(CommandError::InvalidArguments)?;
    ctx.session_mut()
        .update_pending(PendingUpdate::SetStrategy(strategy))?;
    output::success(format!("Strategy set to {}", strategy));
    Ok(())
}

fn set_included(ctx: &mut ShellContext, args: &[&str], included: bool) -> CommandResult {
    let ids = args
        .iter()
        .map(|token| ctx.resolve_participant(token))
        .collect::<Result<Vec<_>, _>>()?;
    for participant in ids {
        ctx.session_mut().update_pending(PendingUpdate::SetIncluded {
            participant,
            included,
        })?;
    }
    Ok(())
}

fn cmd_include(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage(ctx, "include"));
    }
    set_included(ctx, args, true)?;
    output::success(format!("Included {}", args.join(", ")));
    Ok(())
}

fn cmd_exclude(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage(ctx, "exclude"));
    }
    set_included(ctx, args, false)?;
    output::success(format!("Excluded {}", args.join(", ")));
    Ok(())
}

fn cmd_payer(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (who, is_payer) = match args {
        [who] => (*who, true),
        [who, flag] if flag.eq_ignore_ascii_case("off") => (*who, false),
        _ => return Err(usage(ctx, "payer")),
    };
    let participant = ctx.resolve_participant(who)?;
    ctx.session_mut().update_pending(PendingUpdate::SetPayer {
        participant,
        is_payer,
    })?;
    if is_payer {
        output::success(format!("{} paid", who));
    } else {
        output::success(format!("{} is no longer the payer", who));
    }
    Ok(())
}

fn cmd_custom(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [who, value] = args else {
        return Err(usage(ctx, "custom"));
    };
    let participant = ctx.resolve_participant(who)?;
    let pending = ctx
        .session_mut()
        .update_pending(PendingUpdate::SetCustomAmountText {
            participant,
            text: (*value).to_string(),
        })?;
    let amount = pending
        .participation
        .entry(participant)
        .map(|entry| entry.custom_amount)
        .unwrap_or_default();
    output::success(format!("Custom amount for {} set to {}", who, amount));
    Ok(())
}

fn cmd_pending(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render_pending(ctx.session());
    Ok(())
}

fn cmd_commit(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let outcome = ctx.session_mut().commit_expense()?;
    output::success(format!(
        "Recorded `{}` ({}, {})",
        outcome.expense.name, outcome.expense.total, outcome.expense.strategy
    ));
    render_balances(ctx.session());
    Ok(())
}

fn cmd_ledger(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render_balances(ctx.session());
    Ok(())
}

fn cmd_log(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = ctx.session();
    let locale = session.config().locale();
    output::section("Expenses");
    if session.log().is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }
    for (index, record) in session.log().records().iter().enumerate() {
        let expense = &record.expense;
        output::line(format!(
            "{:>3}. {:<20} {:>14}  {:<6}  {}",
            index + 1,
            expense.name,
            format_grouped(&locale, expense.total),
            expense.strategy,
            expense.recorded_at.format("%Y-%m-%d %H:%M")
        ));
    }
    output::line(format!(
        "     {:<20} {:>14}",
        "Total",
        format_grouped(&locale, session.log().total_spent())
    ));
    Ok(())
}

fn cmd_reset(ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    ctx.session_mut().update_pending(PendingUpdate::Reset)?;
    output::success("Pending expense cleared");
    Ok(())
}

fn cmd_config(ctx: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut config = ctx.session().config().clone();
    match args {
        [] => {
            let max = format_grouped(&config.locale(), config.max_amount);
            output::section("Configuration");
            output::line(format!("  max        {}", max));
            output::line(format!("  separator  {}", config.grouping_separator));
            output::line(format!("  strategy   {}", config.default_strategy));
            output::line(format!(
                "  file       {}",
                ctx.config_manager().path().display()
            ));
            return Ok(());
        }
        ["max", value] => {
            config.max_amount = parse_amount_with(&config.locale(), value);
        }
        ["separator", value] => {
            let mut chars = value.chars();
            let (Some(separator), None) = (chars.next(), chars.next()) else {
                return Err(CommandError::InvalidArguments(
                    "separator must be a single character".into(),
                ));
            };
            config.grouping_separator = separator;
        }
        ["strategy", value] => {
            config.default_strategy = value.parse().map_err(CommandError::InvalidArguments)?;
        }
        _ => return Err(usage(ctx, "config")),
    }
    config.validate()?;
    ctx.config_manager().save(&config)?;
    ctx.session_mut().set_config(config);
    output::success("Configuration saved");
    Ok(())
}

fn cmd_version(_ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(())
}

fn cmd_exit(_ctx: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn render_pending(session: &SplitSession) {
    let pending = session.pending();
    let locale = session.config().locale();
    output::section("Pending expense");
    let name = if pending.name.trim().is_empty() {
        "(none)"
    } else {
        pending.name.trim()
    };
    output::line(format!("  Name:     {}", name));
    output::line(format!("  Amount:   {}", format_grouped(&locale, pending.amount)));
    output::line(format!("  Strategy: {}", pending.strategy));
    for (index, participant) in session.roster().iter().enumerate() {
        let Some(entry) = pending.participation.entry(participant.id) else {
            continue;
        };
        let mut flags = vec![if entry.included { "included" } else { "excluded" }];
        if entry.is_payer {
            flags.push("payer");
        }
        let custom = if entry.custom_amount.is_zero() {
            String::new()
        } else {
            format!("  custom {}", format_grouped(&locale, entry.custom_amount))
        };
        output::line(format!(
            "{:>3}. {:<16} {}{}",
            index + 1,
            participant.name,
            flags.join(", "),
            custom
        ));
    }
}

fn render_balances(session: &SplitSession) {
    let ledger = session.ledger();
    let locale = session.config().locale();
    output::section("Balances");
    if ledger.is_empty() {
        output::info("No participants yet. Use `add <name>`.");
        return;
    }
    for (index, (participant, balance)) in ledger.balances().enumerate() {
        output::line(format!(
            "{:>3}. {:<16} {:>14}  {}",
            index + 1,
            participant.name,
            format_grouped(&locale, balance),
            balance_label(balance)
        ));
    }
    if !ledger.unallocated().is_zero() {
        output::line(format!(
            "     {:<16} {:>14}  lost to rounding",
            "Unallocated",
            format_grouped(&locale, ledger.unallocated())
        ));
    }
}

fn balance_label(balance: Amount) -> &'static str {
    match balance.value() {
        value if value > 0 => "owes",
        value if value < 0 => "is owed",
        _ => "settled",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_labels_follow_sign() {
        assert_eq!(balance_label(Amount::new(3_000)), "owes");
        assert_eq!(balance_label(Amount::new(-6_000)), "is owed");
        assert_eq!(balance_label(Amount::ZERO), "settled");
    }

    #[test]
    fn registry_resolves_aliases() {
        let registry = build_registry();
        assert!(registry.get("quit").is_some());
        assert_eq!(registry.get("balances").map(|entry| entry.name), Some("ledger"));
        assert!(registry.get("settle").is_none());
    }
}
