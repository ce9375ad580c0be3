//! Hand-off point for natural-language descriptions.
//!
//! The scanner never writes descriptions itself. A `Describer` (for example a
//! client for a language-model service) is plugged in by the caller and its
//! output is attached to each record.

use crate::scan::FunctionRecord;

/// Produces a short description for a function record.
pub trait Describer {
    fn describe(&self, record: &FunctionRecord) -> anyhow::Result<String>;
}

/// Attach descriptions to every record.
///
/// A failed or blank description leaves the record's `description` as None.
/// Returns the number of records that received one.
pub fn attach_descriptions(records: &mut [FunctionRecord], describer: &dyn Describer) -> usize {
    let total = records.len();
    let mut attached = 0;

    for (i, record) in records.iter_mut().enumerate() {
        tracing::debug!(
            function = %record.full_qualified_name,
            "describing function {}/{}",
            i + 1,
            total
        );
        match describer.describe(record) {
            Ok(text) if !text.trim().is_empty() => {
                record.description = Some(text.trim().to_string());
                attached += 1;
            }
            Ok(_) => {
                tracing::warn!(function = %record.full_qualified_name, "empty description");
            }
            Err(e) => {
                tracing::warn!(function = %record.full_qualified_name, error = %e, "description failed");
            }
        }
    }

    attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::FunctionExtractor;

    struct MockDescriber;

    impl Describer for MockDescriber {
        fn describe(&self, record: &FunctionRecord) -> anyhow::Result<String> {
            match record.name.as_str() {
                "fails" => anyhow::bail!("service unavailable"),
                "blank" => Ok("   ".to_string()),
                name => Ok(format!("  Describes {}.  ", name)),
            }
        }
    }

    #[test]
    fn test_attach_descriptions() {
        let src = "void A::ok() {\n}\nvoid A::fails() {\n}\nvoid A::blank() {\n}\n";
        let mut records = FunctionExtractor::default().records(src, "a.cpp");
        assert_eq!(records.len(), 3);

        let attached = attach_descriptions(&mut records, &MockDescriber);

        assert_eq!(attached, 1);
        assert_eq!(records[0].description.as_deref(), Some("Describes ok."));
        assert!(records[1].description.is_none());
        assert!(records[2].description.is_none());
        assert_eq!(records[0].search_query(), "Describes ok.");
    }
}
