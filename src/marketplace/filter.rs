//! Request filtering by amount and duration bounds

use super::model::{FilterCriteria, FilterUpdate, LoanRequest, NumericInput};

/// Return the requests that satisfy every bound set in `criteria`.
///
/// Source order is preserved. A request whose amount or duration is not a
/// usable number fails any bound placed on that field.
pub fn filter_requests(requests: &[LoanRequest], criteria: &FilterCriteria) -> Vec<LoanRequest> {
    requests
        .iter()
        .filter(|request| matches_criteria(request, criteria))
        .cloned()
        .collect()
}

/// Check a single request against the criteria
pub fn matches_criteria(request: &LoanRequest, criteria: &FilterCriteria) -> bool {
    let amount = request.amount.value();
    let duration = request.duration.value();

    within(amount, criteria.min_amount, |value, bound| value >= bound)
        && within(amount, criteria.max_amount, |value, bound| value <= bound)
        && within(duration, criteria.min_duration, |value, bound| value >= bound)
        && within(duration, criteria.max_duration, |value, bound| value <= bound)
}

fn within(value: Option<i64>, bound: Option<i64>, cmp: impl Fn(i64, i64) -> bool) -> bool {
    match (bound, value) {
        (None, _) => true,
        (Some(bound), Some(value)) => cmp(value, bound),
        (Some(_), None) => false,
    }
}

/// Parse the text of a filter input into a bound.
///
/// Blank and malformed text both leave the bound open.
pub fn parse_bound(field: &str, raw: &str) -> Option<i64> {
    match NumericInput::parse(raw) {
        NumericInput::Value(value) => Some(value),
        NumericInput::Empty => None,
        NumericInput::Invalid(text) => {
            tracing::debug!(field, input = %text, "Ignoring non-numeric filter bound");
            None
        }
    }
}

impl FilterCriteria {
    /// Merge a partial edit; fields absent from the update keep their bound
    pub fn merged(&self, update: &FilterUpdate) -> FilterCriteria {
        let pick = |field: &str, edit: &Option<String>, current: Option<i64>| match edit {
            Some(raw) => parse_bound(field, raw),
            None => current,
        };

        FilterCriteria {
            min_amount: pick("min_amount", &update.min_amount, self.min_amount),
            max_amount: pick("max_amount", &update.max_amount, self.max_amount),
            min_duration: pick("min_duration", &update.min_duration, self.min_duration),
            max_duration: pick("max_duration", &update.max_duration, self.max_duration),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }
}
