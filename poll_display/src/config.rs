// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// The voting scheme used for an assignment poll.
///
/// It determines which choices are collected from the voters and how the
/// results are laid out in the results table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PollMethod {
    /// Yes-only: voters approve the candidates they support.
    Y,
    /// No-only: voters reject candidates. The stored tally for a candidate
    /// row is the complement of the displayed one.
    N,
    /// Yes/No.
    YN,
    /// Yes/No/Abstain.
    YNA,
}

impl PollMethod {
    /// Parses the method code used by the upstream data model.
    ///
    /// An unknown code is a configuration error. The legacy behavior of
    /// falling back to a show-everything display is not reproduced here.
    pub fn parse(code: &str) -> Result<PollMethod, PollDisplayError> {
        match code {
            "Y" => Ok(PollMethod::Y),
            "N" => Ok(PollMethod::N),
            "YN" => Ok(PollMethod::YN),
            "YNA" => Ok(PollMethod::YNA),
            _ => Err(PollDisplayError::UnknownMethod(code.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PollMethod::Y => "Y",
            PollMethod::N => "N",
            PollMethod::YN => "YN",
            PollMethod::YNA => "YNA",
        }
    }

    /// Whether the results table carries a "Yes" column header.
    pub fn shows_yes_header(&self) -> bool {
        match self {
            PollMethod::Y => true,
            PollMethod::N => false,
            PollMethod::YN => true,
            PollMethod::YNA => true,
        }
    }

    /// Whether the results table carries a "No" column header.
    pub fn shows_no_header(&self) -> bool {
        match self {
            PollMethod::Y => false,
            PollMethod::N => true,
            PollMethod::YN => true,
            PollMethod::YNA => true,
        }
    }
}

/// A poll, reduced to what the display layer reads: the method and the
/// total number of valid votes cast. Immutable for the duration of display.
///
/// `votes_valid` must fit in an `i64`: amount arithmetic is signed because
/// of the negative sentinel values. The parsing boundary enforces the bound.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Poll {
    pub method: PollMethod,
    pub votes_valid: u64,
}

/// A vote label on a result cell.
///
/// The lower-case label doubles as the style class of the cell.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum VoteKind {
    Yes,
    No,
    Abstain,
}

impl VoteKind {
    pub fn parse(label: &str) -> Result<VoteKind, PollDisplayError> {
        match label {
            "yes" => Ok(VoteKind::Yes),
            "no" => Ok(VoteKind::No),
            "abstain" => Ok(VoteKind::Abstain),
            _ => Err(PollDisplayError::UnknownVoteLabel(label.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoteKind::Yes => "yes",
            VoteKind::No => "no",
            VoteKind::Abstain => "abstain",
        }
    }
}

/// One result cell: a vote label plus an amount.
///
/// `vote: None` marks cells that are not vote counts (the sum rows carry
/// those). A negative `amount` is a sentinel for "not applicable / unknown",
/// never a real count.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct VotingResult {
    pub vote: Option<VoteKind>,
    pub amount: i64,
}

/// The classification of a display row.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum RowClass {
    /// A candidate row.
    User,
    /// A meta row with poll-wide totals.
    Sums,
}

impl RowClass {
    pub fn label(&self) -> &'static str {
        match self {
            RowClass::User => "user",
            RowClass::Sums => "sums",
        }
    }
}

/// One display row as produced by the aggregation side: a label, a row
/// classification and the associated result cells. Absent cells are `None`
/// and get dropped during filtering.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollTableData {
    pub label: String,
    pub row_class: RowClass,
    pub votes: Vec<Option<VotingResult>>,
}

// ******** Output data structures *********

/// A cell ready for rendering: the vote it counts, the visual slot it
/// occupies and the amount to show. The slot may differ from the raw vote
/// label (method N remaps "no" into the "yes" slot); the vote stays raw and
/// is what renderers key columns on.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DisplayCell {
    pub vote: Option<VoteKind>,
    pub slot: Option<VoteKind>,
    pub amount: i64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DisplayRow {
    pub label: String,
    pub row_class: RowClass,
    pub cells: Vec<DisplayCell>,
}

/// The fully formatted results table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollDisplay {
    pub show_yes_header: bool,
    pub show_no_header: bool,
    pub rows: Vec<DisplayRow>,
}

/// Errors raised at the parsing boundary. The formatting functions
/// themselves are total and never fail.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum PollDisplayError {
    UnknownMethod(String),
    UnknownVoteLabel(String),
}

impl Error for PollDisplayError {}

impl Display for PollDisplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollDisplayError::UnknownMethod(code) => {
                write!(f, "unknown poll method code: {:?}", code)
            }
            PollDisplayError::UnknownVoteLabel(label) => {
                write!(f, "unknown vote label: {:?}", label)
            }
        }
    }
}
