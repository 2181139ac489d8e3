use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::gtfs::{self, GtfsError};
use crate::index::Index;
use crate::types::{ScheduleEntry, UNKNOWN_STOP_NAME};

pub const STOP_TIMES_FILE: &str = "stop_times.txt";

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Missing routeId")]
    MissingRouteId,
    #[error(transparent)]
    Source(#[from] GtfsError),
}

/// First rung: the stop code of a stop, or the stop id itself if it has none.
pub fn resolve_stop_code<'a>(index: &'a Index, stop_id: &'a str) -> &'a str {
    index.stop_code_for_id(stop_id).unwrap_or(stop_id)
}

/// Second rung: the name behind a stop code, or `UNKNOWN_STOP_NAME`.
pub fn resolve_stop_name<'a>(index: &'a Index, stop_code: &str) -> &'a str {
    index.stop_name_for_code(stop_code).unwrap_or(UNKNOWN_STOP_NAME)
}

pub fn stop_name<'a>(index: &'a Index, stop_id: &'a str) -> &'a str {
    resolve_stop_name(index, resolve_stop_code(index, stop_id))
}

/// Joins every stop-times row against the stop tables, in file order.
pub fn read_schedule<R: Read>(index: &Index, reader: csv::Reader<R>) -> Vec<ScheduleEntry> {
    let mut entries = vec![];
    gtfs::scan_rows(reader, STOP_TIMES_FILE, |r| {
        let arrival_time = r.get(1)?;
        let departure_time = r.get(2)?;
        let stop_id = r.get(3)?.trim();
        entries.push(ScheduleEntry {
            stop_name: stop_name(index, stop_id).to_string(),
            arrival_time: arrival_time.to_string(),
            departure_time: departure_time.to_string()
        });
        Some(())
    });
    entries
}

/// Schedule served for `route_id`. The id must be non-empty but does not filter the rows:
/// every stop time in the source is returned.
pub fn schedule_for_route(index: &Index, stop_times_path: &Path, route_id: &str) -> Result<Vec<ScheduleEntry>, ScheduleError> {
    if route_id.is_empty() {
        return Err(ScheduleError::MissingRouteId);
    }
    let reader = gtfs::open(stop_times_path)?;
    Ok(read_schedule(index, reader))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtfs::Dataset;

    fn setup() -> Index {
        let mut d = Dataset::default();
        d.stop_id_to_code.insert("100".to_string(), "C100".to_string());
        d.stop_id_to_code.insert("200".to_string(), "C200".to_string());
        d.stop_code_to_name.insert("C100".to_string(), "Main St".to_string());
        d.stop_code_to_name.insert("300".to_string(), "Kennedy Plaza".to_string());
        Index::from_dataset(d)
    }

    #[test]
    fn code_rung() {
        let i = setup();
        assert_eq!(resolve_stop_code(&i, "100"), "C100");
        assert_eq!(resolve_stop_code(&i, "999"), "999");
    }

    #[test]
    fn name_rung() {
        let i = setup();
        assert_eq!(resolve_stop_name(&i, "C100"), "Main St");
        assert_eq!(resolve_stop_name(&i, "C200"), UNKNOWN_STOP_NAME);
    }

    #[test]
    fn full_chain() {
        let i = setup();
        assert_eq!(stop_name(&i, "100"), "Main St");
        // no code, but the raw id is a known code
        assert_eq!(stop_name(&i, "300"), "Kennedy Plaza");
        assert_eq!(stop_name(&i, "200"), "Unknown Stop");
        assert_eq!(stop_name(&i, "999"), "Unknown Stop");
    }

    #[test]
    fn rows_in_source_order() {
        let i = setup();
        let entries = read_schedule(&i, gtfs::reader(
            "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
            T1,08:10,08:11,300,2\n\
            T1,08:00,08:01, 100 ,1\n\
            T1,08:00,08:01, 100 ,1\n".as_bytes()));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].stop_name, "Kennedy Plaza");
        assert_eq!(entries[1], ScheduleEntry {
            stop_name: "Main St".to_string(),
            arrival_time: "08:00".to_string(),
            departure_time: "08:01".to_string()
        });
        assert_eq!(entries[1], entries[2]);
    }

    #[test]
    fn empty_route_id_rejected_before_open() {
        let i = setup();
        let r = schedule_for_route(&i, Path::new("./does/not/exist.txt"), "");
        assert!(matches!(r, Err(ScheduleError::MissingRouteId)));
    }

    #[test]
    fn missing_source() {
        let i = setup();
        let r = schedule_for_route(&i, Path::new("./does/not/exist.txt"), "R1");
        assert!(matches!(r, Err(ScheduleError::Source(GtfsError::Open { .. }))));
    }
}
