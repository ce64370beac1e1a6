//! Built-in layouts for the export formats observed in the field.
//!
//! Column geometry was measured from real M1 Pro exports; each list type
//! pads its data lines to a distinct fixed width, which is what makes modal
//! line width the strongest detection signal. Extending support for a new
//! list type means adding an entry here — detection and normalization never
//! special-case a layout name.

use m1_model::{Layout, LayoutField};

/// Patient search result list, 80 columns, titled header line.
pub const SEARCH_RESULTS: &str = "search-results";
/// Billing audit list (GO-Fehler), 90 columns.
pub const BILLING_ERRORS: &str = "billing-errors";
/// Text group statistics list (Textgruppenstatistik), 96 columns.
pub const TEXT_GROUPS: &str = "text-groups";

fn layout(name: &str, total_width: usize, fields: Vec<LayoutField>) -> Layout {
    Layout::new(name, total_width, fields).expect("builtin layout is well-formed")
}

pub fn builtin_layouts() -> Vec<Layout> {
    vec![
        layout(
            SEARCH_RESULTS,
            80,
            vec![
                LayoutField::identifier("patient_id", 0, 10),
                LayoutField::text("last_name", 10, 20),
                LayoutField::text("first_name", 30, 18),
                LayoutField::date("birth_date", 48, 10),
                LayoutField::text("insurance", 58, 12).optional(),
                LayoutField::text("status", 70, 10).optional(),
            ],
        )
        .with_header("PATIENT SEARCH RESULTS"),
        layout(
            BILLING_ERRORS,
            90,
            vec![
                LayoutField::identifier("patient_id", 0, 8),
                LayoutField::text("last_name", 8, 22),
                LayoutField::text("first_name", 30, 18),
                LayoutField::date("birth_date", 48, 10),
                LayoutField::text("billing_type", 58, 8),
                LayoutField::text("quarter", 66, 5),
                LayoutField::text("status", 71, 3),
                LayoutField::text("vknr", 74, 7).optional(),
                LayoutField::text("ktab", 81, 2).optional(),
            ],
        )
        .with_header("BILLING AUDIT"),
        layout(
            TEXT_GROUPS,
            96,
            vec![
                LayoutField::identifier("patient_id", 0, 10),
                LayoutField::text("last_name", 10, 22),
                LayoutField::text("first_name", 32, 18),
                LayoutField::date("birth_date", 50, 10),
                LayoutField::text("insurer", 60, 24),
                LayoutField::text("member_id", 84, 12).optional(),
            ],
        )
        .with_header("TEXTGRUPPENSTATISTIK"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_layouts_are_valid_and_named() {
        let layouts = builtin_layouts();
        assert_eq!(layouts.len(), 3);
        for layout in &layouts {
            assert!(!layout.name().is_empty());
            assert!(layout.min_required_width() <= layout.total_width());
        }
    }

    #[test]
    fn builtin_widths_are_distinct() {
        let layouts = builtin_layouts();
        let mut widths: Vec<usize> = layouts.iter().map(Layout::total_width).collect();
        widths.sort_unstable();
        widths.dedup();
        assert_eq!(widths.len(), layouts.len());
    }
}
