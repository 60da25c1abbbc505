use poll_display::*;

use crate::polls::config_reader::PollConfig;

/// The aggregation side of the table: turns the parsed poll description
/// into raw display rows. It stands in for the upstream service that
/// tallies votes; here the counts are already present in the input file.
pub struct PollRows {
    config: PollConfig,
}

impl PollRows {
    pub fn new(config: PollConfig) -> PollRows {
        PollRows { config }
    }
}

impl TableDataProvider for PollRows {
    fn generate_table_data(&self, poll: &Poll) -> Vec<PollTableData> {
        let mut rows: Vec<PollTableData> = Vec::new();
        for opt in self.config.options.iter() {
            rows.push(PollTableData {
                label: opt.user.clone(),
                row_class: RowClass::User,
                votes: vec![
                    cell(VoteKind::Yes, opt.yes),
                    cell(VoteKind::No, opt.no),
                    cell(VoteKind::Abstain, opt.abstain),
                ],
            });
        }
        rows.push(sum_row("Valid votes", poll.votes_valid as i64));
        if let Some(amount) = self.config.votesinvalid {
            rows.push(sum_row("Invalid votes", amount));
        }
        if let Some(amount) = self.config.votescast {
            rows.push(sum_row("Votes cast", amount));
        }
        rows
    }
}

fn cell(vote: VoteKind, amount: Option<i64>) -> Option<VotingResult> {
    amount.map(|amount| VotingResult {
        vote: Some(vote),
        amount,
    })
}

fn sum_row(label: &str, amount: i64) -> PollTableData {
    PollTableData {
        label: label.to_string(),
        row_class: RowClass::Sums,
        votes: vec![Some(VotingResult { vote: None, amount })],
    }
}
