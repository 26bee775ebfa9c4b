//! Canonical code synthesis.

use parts_ingest::RawRecord;

use crate::aliases::{PART_ID_FIELDS, PREFIX_FIELDS};

/// Integer value of a cell; spreadsheet exports write `13` as `13.0`.
fn integer_value(value: &str) -> Option<i64> {
    if let Ok(integer) = value.parse::<i64>() {
        return Some(integer);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15 {
        Some(float as i64)
    } else {
        None
    }
}

fn first_integer(record: &RawRecord, fields: &[&str]) -> Option<i64> {
    fields.iter().find_map(|field| {
        let value = record.get(field)?.trim();
        if value.is_empty() {
            return None;
        }
        integer_value(value)
    })
}

/// Formats a code from its parts: `{prefix:part}` or `{part}`.
#[must_use]
pub fn format_code(prefix: Option<i64>, part: i64) -> String {
    match prefix {
        Some(prefix) => format!("{{{prefix}:{part}}}"),
        None => format!("{{{part}}}"),
    }
}

/// Builds the canonical code of a raw record.
///
/// The prefix is the first integer found among [`PREFIX_FIELDS`], the part
/// the first integer among [`PART_ID_FIELDS`]; fields that are blank or not
/// integers are passed over. Without a part id the code is empty.
#[must_use]
pub fn synthesize_code(record: &RawRecord) -> String {
    let prefix = first_integer(record, PREFIX_FIELDS);
    match first_integer(record, PART_ID_FIELDS) {
        Some(part) => format_code(prefix, part),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_and_part_make_a_typed_code() {
        let record = RawRecord::from_pairs([("Grenade_perk_main_ID", "245"), ("Part_ID", "1")]);
        assert_eq!(synthesize_code(&record), "{245:1}");
    }

    #[test]
    fn part_alone_makes_a_simple_code() {
        let record = RawRecord::from_pairs([("perk_ID", " 17 ")]);
        assert_eq!(synthesize_code(&record), "{17}");
    }

    #[test]
    fn prefix_without_part_is_empty() {
        let record = RawRecord::from_pairs([("Type ID", "13"), ("String", "Barrel")]);
        assert_eq!(synthesize_code(&record), "");
    }

    #[test]
    fn non_numeric_candidates_are_skipped() {
        let record = RawRecord::from_pairs([
            ("Type ID", "n/a"),
            ("Manufacturer ID", "9"),
            ("ID", ""),
            ("Part ID", "x"),
            ("Part_ID", "3"),
        ]);
        assert_eq!(synthesize_code(&record), "{9:3}");
    }

    #[test]
    fn integral_float_text_is_one_integer() {
        let record = RawRecord::from_pairs([("Type ID", "13.0"), ("ID", "4.0")]);
        assert_eq!(synthesize_code(&record), "{13:4}");
        let record = RawRecord::from_pairs([("Type ID", "13.5"), ("ID", "4")]);
        assert_eq!(synthesize_code(&record), "{4}");
    }
}
