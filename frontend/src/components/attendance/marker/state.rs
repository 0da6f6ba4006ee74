use std::collections::HashMap;

use common::model::attendance::AttendanceStatus;
use common::model::student::Student;

use crate::helpers::today;

/// State container for the attendance marker.
///
/// Fields are `pub` because they are accessed by the `view` and `update`
/// modules.
pub struct AttendanceMarker {
    /// Roster in roll-number order, re-fetched whenever the date changes.
    pub students: Vec<Student>,

    /// Selected calendar date (ISO `YYYY-MM-DD`). Defaults to today; the
    /// date input's `max` attribute keeps it from moving into the future.
    pub selected_date: String,

    /// student id -> status chosen for the selected date. Rebuilt from the
    /// fetched records on every date change and updated optimistically on
    /// each click.
    pub attendance: HashMap<String, AttendanceStatus>,

    /// student id -> last status the store acknowledged, seeded from the
    /// fetched records and advanced on each save confirmation. A failed
    /// save reverts the displayed entry to this value, which may already
    /// reflect a later click's confirmed save.
    pub confirmed: HashMap<String, AttendanceStatus>,

    /// Whether the per-date fetch is in flight.
    pub loading: bool,

    /// Transient save indicator ("Saved" / "Error saving"), self-clearing.
    pub save_status: Option<&'static str>,

    /// Sequence number of the latest issued fetch. Responses carrying an
    /// older number are discarded so a slow response cannot overwrite a
    /// newer selection's data.
    pub fetch_seq: u32,

    /// Guard to avoid running first-render initialization more than once.
    pub loaded: bool,
}

impl AttendanceMarker {
    pub fn new() -> Self {
        AttendanceMarker {
            students: Vec::new(),
            selected_date: today(),
            attendance: HashMap::new(),
            confirmed: HashMap::new(),
            loading: false,
            save_status: None,
            fetch_seq: 0,
            loaded: false,
        }
    }
}
