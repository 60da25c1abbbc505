use log::debug;

use poll_display::{Poll, PollMethod};
use snafu::prelude::*;

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

use crate::polls::*;

/// One candidate option with its raw counts, as stored upstream.
///
/// A count is omitted when the method never collected that choice; a
/// negative count is the sentinel for "not applicable / unknown".
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub user: String,
    pub yes: Option<i64>,
    pub no: Option<i64>,
    pub abstain: Option<i64>,
}

/// The poll description document. Field names follow the upstream data
/// model (`pollmethod`, `votesvalid`, ...).
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    pub pollmethod: String,
    pub votesvalid: u64,
    pub votesinvalid: Option<i64>,
    pub votescast: Option<i64>,
    pub options: Vec<PollOption>,
}

pub fn read_poll_config(path: &str) -> PollTabResult<PollConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let config: PollConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

/// Validates the upstream method code and narrows the description down to
/// the poll the display layer reads.
pub fn validate_poll(config: &PollConfig) -> PollTabResult<Poll> {
    let method = PollMethod::parse(config.pollmethod.as_str()).context(InvalidPollSnafu {})?;
    // Amount arithmetic is signed; see the bound documented on Poll.
    if i64::try_from(config.votesvalid).is_err() {
        whatever!(
            "votesvalid {} exceeds the displayable range",
            config.votesvalid
        );
    }
    Ok(Poll {
        method,
        votes_valid: config.votesvalid,
    })
}

pub fn read_summary(path: &str) -> PollTabResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
