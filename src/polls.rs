use log::{info, warn};

use poll_display::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::polls::config_reader::*;
use crate::polls::table_builder::PollRows;

pub mod config_reader;
pub mod table_builder;

#[derive(Debug, Snafu)]
pub enum PollTabError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Invalid poll description: {source}"))]
    InvalidPoll { source: PollDisplayError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PollTabResult<T> = Result<T, PollTabError>;

fn format_amount(amount: i64) -> String {
    // Negative amounts are the upstream sentinel for "not applicable".
    if amount < 0 {
        "n/a".to_string()
    } else {
        amount.to_string()
    }
}

fn column_header(column: VoteKind) -> &'static str {
    match column {
        VoteKind::Yes => "Yes",
        VoteKind::No => "No",
        VoteKind::Abstain => "Abstain",
    }
}

/// Renders the formatted table as plain text: one line of column headers
/// driven by the header-visibility flags, the candidate rows under them,
/// and the sum rows below.
///
/// Cells are placed in the column of their raw vote, so a row missing some
/// count keeps the remaining amounts aligned under the right headers. Under
/// method N the single column is the "no" one; the slot remap only affects
/// styling, not placement.
fn render_text(display: &PollDisplay) -> String {
    let has_abstain_column = display
        .rows
        .iter()
        .flat_map(|r| r.cells.iter())
        .any(|c| c.vote == Some(VoteKind::Abstain));

    let mut columns: Vec<VoteKind> = Vec::new();
    if display.show_yes_header {
        columns.push(VoteKind::Yes);
    }
    if display.show_no_header {
        columns.push(VoteKind::No);
    }
    if has_abstain_column {
        columns.push(VoteKind::Abstain);
    }

    let label_width = display
        .rows
        .iter()
        .map(|r| r.label.len())
        .max()
        .unwrap_or(0)
        .max(9);

    let mut out = String::new();
    out.push_str(&format!("{:<width$}", "", width = label_width));
    for column in columns.iter() {
        out.push_str(&format!("{:>9}", column_header(*column)));
    }
    out.push('\n');

    for row in display.rows.iter() {
        if row.row_class != RowClass::User {
            continue;
        }
        out.push_str(&format!("{:<width$}", row.label, width = label_width));
        for column in columns.iter() {
            let cell = row.cells.iter().find(|c| c.vote == Some(*column));
            match cell {
                Some(c) => out.push_str(&format!("{:>9}", format_amount(c.amount))),
                None => out.push_str(&format!("{:>9}", "")),
            }
        }
        out.push('\n');
    }

    for row in display.rows.iter() {
        if row.row_class != RowClass::Sums {
            continue;
        }
        for cell in row.cells.iter() {
            out.push_str(&format!("{}: {}\n", row.label, format_amount(cell.amount)));
        }
    }
    out
}

/// Assembles the JSON summary of the formatted table. This is the document
/// compared against a reference file when one is provided.
fn display_to_json(poll: &Poll, display: &PollDisplay) -> JSValue {
    let mut rows: Vec<JSValue> = Vec::new();
    for row in display.rows.iter() {
        let cells: Vec<JSValue> = row
            .cells
            .iter()
            .map(|c| {
                json!({
                    "vote": c.vote.map(|v| v.label()),
                    "slot": c.slot.map(|s| s.label()),
                    "amount": c.amount,
                })
            })
            .collect();
        rows.push(json!({
            "label": row.label,
            "class": row.row_class.label(),
            "cells": cells,
        }));
    }
    json!({
        "pollmethod": poll.method.as_str(),
        "votesvalid": poll.votes_valid,
        "showYesHeader": display.show_yes_header,
        "showNoHeader": display.show_no_header,
        "rows": rows,
    })
}

pub fn run_display(
    config_path: String,
    reference_path: Option<String>,
    out_path: Option<String>,
) -> PollTabResult<()> {
    let config = read_poll_config(&config_path)?;
    info!("config: {:?}", config);

    let poll = validate_poll(&config)?;
    let provider = PollRows::new(config);
    let display = build_display(&poll, &provider);

    print!("{}", render_text(&display));

    let summary = display_to_json(&poll, &display);
    let pretty_js_summary = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    match out_path {
        Some(p) if p == "stdout" => println!("{}", pretty_js_summary),
        Some(p) => fs::write(&p, &pretty_js_summary).context(OpeningJsonSnafu { path: p })?,
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(reference_p) = reference_path {
        let summary_ref = read_summary(&reference_p)?;
        info!("reference summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_summary.as_str(),
                "\n",
            );
            whatever!("Difference detected between formatted summary and reference summary")
        }
    }

    Ok(())
}
