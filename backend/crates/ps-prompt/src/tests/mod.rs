mod structure_composer;

use crate::VariableResolver;

use chrono::{Local, TimeZone};

/// Resolver pinned to Tuesday, March 5, 2024 14:07 local time.
pub(crate) fn fixed_resolver() -> VariableResolver {
    let now = Local
        .with_ymd_and_hms(2024, 3, 5, 14, 7, 0)
        .single()
        .unwrap();
    VariableResolver::new("Green Thumb", "Gardening for everyone").at_time(now)
}
