mod config;
use log::{debug, info};

pub use crate::config::*;

pub mod manual;

/// The row-generation capability supplied by the aggregation side.
///
/// The display layer never computes result rows itself; it formats whatever
/// the provider hands over. Substituting a stub provider is the intended way
/// to exercise the formatting in isolation.
pub trait TableDataProvider {
    fn generate_table_data(&self, poll: &Poll) -> Vec<PollTableData>;
}

/// The visual slot a result cell is rendered in.
///
/// Under the No-only method the single collected choice occupies the "yes"
/// slot of the table, so a `No` vote is remapped there. Every other
/// combination passes through unchanged, including cells without a label.
pub fn vote_display_class(method: PollMethod, result: &VotingResult) -> Option<VoteKind> {
    match (method, result.vote) {
        (PollMethod::N, Some(VoteKind::No)) => Some(VoteKind::Yes),
        (_, vote) => vote,
    }
}

/// Whether a result cell is relevant under the given method.
///
/// Cells without a vote label are not vote-type cells and always fit.
pub fn vote_fits_method(method: PollMethod, result: &VotingResult) -> bool {
    let vote = match result.vote {
        None => return true,
        Some(v) => v,
    };
    match method {
        PollMethod::Y => vote == VoteKind::Yes,
        PollMethod::N => vote == VoteKind::No,
        PollMethod::YN => vote != VoteKind::Abstain,
        PollMethod::YNA => true,
    }
}

/// Keeps the result cells that are present and fit the method, in their
/// original order. The input is left untouched.
pub fn filter_relevant_results(
    method: PollMethod,
    results: &[Option<VotingResult>],
) -> Vec<VotingResult> {
    results
        .iter()
        .filter_map(|r| match r {
            Some(result) if vote_fits_method(method, result) => Some(*result),
            _ => None,
        })
        .collect()
}

/// The amount shown for a result cell.
///
/// Method N stores the complementary tally on candidate rows: the shown
/// value is `votes_valid - amount`. Sentinel amounts pass through untouched,
/// as does every other method/row combination.
pub fn adjusted_amount(poll: &Poll, row_class: RowClass, result: &VotingResult) -> i64 {
    match (poll.method, row_class) {
        (PollMethod::N, RowClass::User) if result.amount >= 0 => {
            poll.votes_valid as i64 - result.amount
        }
        _ => result.amount,
    }
}

/// Assembles the formatted results table for one poll.
///
/// Pulls the raw rows from the provider, drops the cells that are irrelevant
/// under the poll's method and maps each kept cell to its visual slot and
/// displayed amount. Pure with respect to its inputs: rebuilding from the
/// same poll and provider yields the same table.
pub fn build_display<P: TableDataProvider + ?Sized>(poll: &Poll, provider: &P) -> PollDisplay {
    let table_data = provider.generate_table_data(poll);
    info!(
        "build_display: method {}, votes_valid {}, {} raw rows",
        poll.method.as_str(),
        poll.votes_valid,
        table_data.len()
    );

    let mut rows: Vec<DisplayRow> = Vec::with_capacity(table_data.len());
    for row in table_data {
        let kept = filter_relevant_results(poll.method, &row.votes);
        debug!(
            "build_display: row {:?} ({}): kept {} of {} cells",
            row.label,
            row.row_class.label(),
            kept.len(),
            row.votes.len()
        );
        let cells: Vec<DisplayCell> = kept
            .iter()
            .map(|result| DisplayCell {
                vote: result.vote,
                slot: vote_display_class(poll.method, result),
                amount: adjusted_amount(poll, row.row_class, result),
            })
            .collect();
        rows.push(DisplayRow {
            label: row.label,
            row_class: row.row_class,
            cells,
        });
    }

    PollDisplay {
        show_yes_header: poll.method.shows_yes_header(),
        show_no_header: poll.method.shows_no_header(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METHODS: [PollMethod; 4] =
        [PollMethod::Y, PollMethod::N, PollMethod::YN, PollMethod::YNA];

    fn cell(vote: VoteKind, amount: i64) -> VotingResult {
        VotingResult {
            vote: Some(vote),
            amount,
        }
    }

    fn label_cell(amount: i64) -> VotingResult {
        VotingResult { vote: None, amount }
    }

    #[test]
    fn header_visibility_table() {
        let expected = [
            (PollMethod::Y, true, false),
            (PollMethod::N, false, true),
            (PollMethod::YN, true, true),
            (PollMethod::YNA, true, true),
        ];
        for (method, yes, no) in expected {
            assert_eq!(method.shows_yes_header(), yes, "method {}", method.as_str());
            assert_eq!(method.shows_no_header(), no, "method {}", method.as_str());
        }
    }

    #[test]
    fn method_n_remaps_no_into_yes_slot() {
        let no_vote = cell(VoteKind::No, 4);
        assert_eq!(
            vote_display_class(PollMethod::N, &no_vote),
            Some(VoteKind::Yes)
        );
        // Every other method passes the label through.
        for method in [PollMethod::Y, PollMethod::YN, PollMethod::YNA] {
            assert_eq!(vote_display_class(method, &no_vote), Some(VoteKind::No));
        }
    }

    #[test]
    fn non_no_labels_pass_through_under_method_n() {
        assert_eq!(
            vote_display_class(PollMethod::N, &cell(VoteKind::Abstain, 1)),
            Some(VoteKind::Abstain)
        );
        assert_eq!(vote_display_class(PollMethod::N, &label_cell(10)), None);
    }

    #[test]
    fn fit_by_method() {
        let yes = cell(VoteKind::Yes, 1);
        let no = cell(VoteKind::No, 1);
        let abstain = cell(VoteKind::Abstain, 1);

        assert!(vote_fits_method(PollMethod::Y, &yes));
        assert!(!vote_fits_method(PollMethod::Y, &no));
        assert!(!vote_fits_method(PollMethod::Y, &abstain));

        assert!(!vote_fits_method(PollMethod::N, &yes));
        assert!(vote_fits_method(PollMethod::N, &no));
        assert!(!vote_fits_method(PollMethod::N, &abstain));

        assert!(vote_fits_method(PollMethod::YN, &yes));
        assert!(vote_fits_method(PollMethod::YN, &no));
        assert!(!vote_fits_method(PollMethod::YN, &abstain));

        assert!(vote_fits_method(PollMethod::YNA, &yes));
        assert!(vote_fits_method(PollMethod::YNA, &no));
        assert!(vote_fits_method(PollMethod::YNA, &abstain));
    }

    #[test]
    fn unlabeled_cells_always_fit() {
        for method in ALL_METHODS {
            assert!(vote_fits_method(method, &label_cell(7)));
            assert!(vote_fits_method(method, &label_cell(-2)));
        }
    }

    #[test]
    fn filtering_preserves_order_and_drops_absent_cells() {
        let results = vec![
            Some(cell(VoteKind::Yes, 3)),
            None,
            Some(cell(VoteKind::Abstain, 1)),
            Some(cell(VoteKind::No, 2)),
            Some(label_cell(6)),
            None,
        ];
        let kept = filter_relevant_results(PollMethod::YN, &results);
        assert_eq!(
            kept,
            vec![cell(VoteKind::Yes, 3), cell(VoteKind::No, 2), label_cell(6)]
        );
        // The input is not consumed or reordered.
        assert_eq!(results.len(), 6);
        assert_eq!(results[0], Some(cell(VoteKind::Yes, 3)));
    }

    #[test]
    fn filtering_method_y_keeps_only_yes() {
        let results = vec![
            Some(cell(VoteKind::No, 9)),
            Some(cell(VoteKind::Yes, 4)),
            Some(cell(VoteKind::Abstain, 1)),
        ];
        assert_eq!(
            filter_relevant_results(PollMethod::Y, &results),
            vec![cell(VoteKind::Yes, 4)]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let results = vec![
            Some(cell(VoteKind::Yes, 3)),
            None,
            Some(cell(VoteKind::No, 2)),
        ];
        let once = filter_relevant_results(PollMethod::YNA, &results);
        let again: Vec<Option<VotingResult>> = once.iter().map(|r| Some(*r)).collect();
        assert_eq!(filter_relevant_results(PollMethod::YNA, &again), once);
    }

    #[test]
    fn amount_complemented_on_user_rows_under_method_n() {
        let poll = Poll {
            method: PollMethod::N,
            votes_valid: 10,
        };
        let vote = cell(VoteKind::No, 3);
        assert_eq!(adjusted_amount(&poll, RowClass::User, &vote), 7);
    }

    #[test]
    fn sentinel_amounts_are_never_complemented() {
        let poll = Poll {
            method: PollMethod::N,
            votes_valid: 10,
        };
        let vote = cell(VoteKind::No, -1);
        assert_eq!(adjusted_amount(&poll, RowClass::User, &vote), -1);
    }

    #[test]
    fn amount_untouched_outside_method_n_user_rows() {
        let n_poll = Poll {
            method: PollMethod::N,
            votes_valid: 10,
        };
        // Sum rows keep their stored amount even under method N.
        assert_eq!(
            adjusted_amount(&n_poll, RowClass::Sums, &cell(VoteKind::No, 3)),
            3
        );
        let yna_poll = Poll {
            method: PollMethod::YNA,
            votes_valid: 10,
        };
        assert_eq!(
            adjusted_amount(&yna_poll, RowClass::User, &cell(VoteKind::No, 3)),
            3
        );
    }

    #[test]
    fn unknown_method_code_is_rejected() {
        assert_eq!(PollMethod::parse("YN"), Ok(PollMethod::YN));
        assert_eq!(
            PollMethod::parse("RANKED"),
            Err(PollDisplayError::UnknownMethod("RANKED".to_string()))
        );
        assert_eq!(
            VoteKind::parse("maybe"),
            Err(PollDisplayError::UnknownVoteLabel("maybe".to_string()))
        );
    }

    struct FixedRows(Vec<PollTableData>);

    impl TableDataProvider for FixedRows {
        fn generate_table_data(&self, _poll: &Poll) -> Vec<PollTableData> {
            self.0.clone()
        }
    }

    fn two_candidate_rows() -> Vec<PollTableData> {
        vec![
            PollTableData {
                label: "Ada".to_string(),
                row_class: RowClass::User,
                votes: vec![
                    Some(cell(VoteKind::Yes, 6)),
                    Some(cell(VoteKind::No, 3)),
                    Some(cell(VoteKind::Abstain, 1)),
                ],
            },
            PollTableData {
                label: "Valid votes".to_string(),
                row_class: RowClass::Sums,
                votes: vec![Some(label_cell(10))],
            },
        ]
    }

    #[test]
    fn build_display_under_method_n() {
        let poll = Poll {
            method: PollMethod::N,
            votes_valid: 10,
        };
        let provider = FixedRows(two_candidate_rows());
        let display = build_display(&poll, &provider);

        assert!(!display.show_yes_header);
        assert!(display.show_no_header);
        assert_eq!(display.rows.len(), 2);

        // The candidate row keeps only the "no" cell, shown in the "yes"
        // slot with the complemented amount. The raw vote stays "no".
        let ada = &display.rows[0];
        assert_eq!(ada.label, "Ada");
        assert_eq!(
            ada.cells,
            vec![DisplayCell {
                vote: Some(VoteKind::No),
                slot: Some(VoteKind::Yes),
                amount: 7,
            }]
        );

        // The sums row is untouched apart from formatting.
        let sums = &display.rows[1];
        assert_eq!(sums.row_class, RowClass::Sums);
        assert_eq!(
            sums.cells,
            vec![DisplayCell {
                vote: None,
                slot: None,
                amount: 10,
            }]
        );
    }

    #[test]
    fn build_display_is_deterministic() {
        let poll = Poll {
            method: PollMethod::YNA,
            votes_valid: 10,
        };
        let provider = FixedRows(two_candidate_rows());
        assert_eq!(build_display(&poll, &provider), build_display(&poll, &provider));
    }
}
