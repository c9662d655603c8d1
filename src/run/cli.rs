use anyhow::Result;
use chrono::{Datelike, Local};
use std::path::Path;

use crate::ledger::Ledger;
use crate::report::{self, calendar};
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], ledger),
        "list" | "ls" => cli_list(ledger),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "summary" | "s" => cli_summary(ledger),
        "calendar" | "cal" => cli_calendar(&args[2..], ledger),
        "export" => cli_export(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("cashlog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("CashLog — local-only, single-user income ledger");
    println!();
    println!("Usage: cashlog [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  add <amount> [remark]         Record income with the current timestamp");
    println!("  list                          List all records, newest first");
    println!("  delete <id>                   Delete a record by its list id");
    println!("  summary                       Print totals grouped by remark");
    println!("  calendar [YYYY-MM]            Print the month's day grid and totals");
    println!("  export [path]                 Write all records to a CSV file");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_add(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let amount = match args.first() {
        Some(a) => a.as_str(),
        None => anyhow::bail!("Usage: cashlog add <amount> [remark]"),
    };
    let remark = args[1..].join(" ");

    let id = ledger.append(amount, &remark)?;
    let line = ledger
        .records()
        .last()
        .map(|r| r.entry_line())
        .unwrap_or_default();
    println!("Recorded #{id}: {line}");
    Ok(())
}

fn cli_list(ledger: &mut Ledger) -> Result<()> {
    if ledger.is_empty() {
        println!("No records yet");
        return Ok(());
    }

    println!("{:<5} {:<20} {:>14}  Remark", "ID", "Recorded", "Amount");
    println!("{}", "─".repeat(60));
    for record in ledger.records().iter().rev() {
        println!(
            "{:<5} {:<20} {:>14}  {}",
            record.id,
            record.timestamp,
            format_amount(record.amount),
            record.remark,
        );
    }
    println!("{}", "─".repeat(60));
    println!("{} total", ledger.len());
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let id: u64 = match args.first().and_then(|a| a.parse().ok()) {
        Some(id) => id,
        None => anyhow::bail!("Usage: cashlog delete <id>"),
    };

    ledger.delete(id)?;
    println!("Deleted record #{id}");
    Ok(())
}

fn cli_summary(ledger: &mut Ledger) -> Result<()> {
    if ledger.is_empty() {
        println!("No records yet");
        return Ok(());
    }

    println!("CashLog — totals by remark");
    println!("{}", "─".repeat(40));
    for (remark, total) in report::remark_summary(ledger.records()) {
        println!("  {remark:<24} {:>12}", format_amount(total));
    }
    Ok(())
}

fn cli_calendar(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let today = Local::now();
    let (year, month) = match args.first().filter(|a| !a.starts_with('-')) {
        Some(arg) => match arg.split_once('-') {
            Some((y, m)) => {
                let year: i32 = y.parse().map_err(|_| usage_err())?;
                let month: u32 = m.parse().map_err(|_| usage_err())?;
                (year, month)
            }
            None => return Err(usage_err()),
        },
        None => (today.year(), today.month()),
    };

    if !(1..=12).contains(&month) {
        anyhow::bail!("Month must be 1-12");
    }
    let range = calendar::year_range();
    if !range.contains(&year) {
        anyhow::bail!("Year must be between {} and {}", range.start(), range.end());
    }

    let buckets = calendar::day_buckets(ledger.records());

    println!("{year:04}-{month:02}");
    println!("  Mon  Tue  Wed  Thu  Fri  Sat  Sun");
    for week in calendar::month_grid(year, month) {
        let cells: Vec<String> = week
            .iter()
            .map(|&day| {
                if day == 0 {
                    return "     ".to_string();
                }
                let key = calendar::day_key_for(year, month, day);
                let has_income = buckets
                    .get(&key)
                    .is_some_and(|b| b.total > rust_decimal::Decimal::ZERO);
                // Days with income are starred; totals follow below
                if has_income {
                    format!("{day:>4}*")
                } else {
                    format!("{day:>4} ")
                }
            })
            .collect();
        println!("{}", cells.join(""));
    }

    let mut day_lines = Vec::new();
    for day in 1..=calendar::days_in_month(year, month) {
        let key = calendar::day_key_for(year, month, day);
        if let Some(bucket) = buckets.get(&key) {
            day_lines.push(format!(
                "  {key}  {:>12}  ({} record{})",
                format_amount(bucket.total),
                bucket.entries.len(),
                if bucket.entries.len() == 1 { "" } else { "s" },
            ));
        }
    }
    if day_lines.is_empty() {
        println!();
        println!("No records this month");
    } else {
        println!();
        for line in day_lines {
            println!("{line}");
        }
    }
    Ok(())
}

fn usage_err() -> anyhow::Error {
    anyhow::anyhow!("Usage: cashlog calendar [YYYY-MM]")
}

fn cli_export(args: &[String], ledger: &mut Ledger) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| crate::run::shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/cashlog-export.csv")
        });

    let count = ledger.export(Path::new(&output_path))?;
    if count == 0 {
        println!("No records yet — wrote header only to {output_path}");
    } else {
        println!("Exported {count} records to {output_path}");
    }
    Ok(())
}
