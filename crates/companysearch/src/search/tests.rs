use super::*;
use crate::fields::FieldAllowList;
use crate::predicate::CompareOp;
use crate::sql::{BindValue, PlaceholderStyle};

fn fields() -> SelectedFields {
    FieldAllowList::default()
        .select(["company_number", "company_name"])
        .unwrap()
}

fn build(filter: &FilterSpec) -> QueryPlan {
    QueryBuilder::default().build(filter, &fields(), 1, 20).unwrap()
}

fn text(s: &str) -> BindValue {
    BindValue::from(s)
}

const SELECT: &str = "SELECT company_number, company_name FROM companies WHERE 1=1";
const TAIL: &str = " ORDER BY company_name LIMIT ? OFFSET ?";

#[test]
fn empty_filter_only_paginates() {
    let plan = build(&FilterSpec::default());
    assert_eq!(plan.sql(), format!("{SELECT}{TAIL}"));
    assert_eq!(plan.params(), &[BindValue::Int(20), BindValue::Int(0)]);
    assert_eq!(plan.placeholder_count(), plan.params().len());
}

#[test]
fn company_number_is_exact_match() {
    let filter = FilterSpec::new().with_company_number("01234567");
    let predicates = QueryBuilder::default().predicates(&filter);
    assert_eq!(predicates.len(), 1);
    assert!(!predicates[0].uses(CompareOp::Like));

    let plan = build(&filter);
    assert_eq!(
        plan.sql(),
        format!("{SELECT} AND company_number = ?{TAIL}")
    );
    assert_eq!(plan.params()[0], text("01234567"));
    assert_eq!(plan.params().len(), 3);
}

#[test]
fn company_number_is_trimmed() {
    let plan = build(&FilterSpec::new().with_company_number("  01234567 "));
    assert_eq!(plan.params()[0], text("01234567"));
}

#[test]
fn company_number_suppresses_name_matching() {
    let filter = FilterSpec::new()
        .with_company_number("01234567")
        .with_company_name("Microsoft", SearchType::Contains);
    let plan = build(&filter);
    assert_eq!(
        plan.sql(),
        format!("{SELECT} AND company_number = ?{TAIL}")
    );
}

#[test]
fn padded_company_number_still_suppresses_name() {
    let filter = FilterSpec::new()
        .with_company_number(" 01234567\t")
        .with_company_name("Microsoft", SearchType::Is);
    let predicates = QueryBuilder::default().predicates(&filter);
    assert_eq!(predicates.len(), 1);
    assert_eq!(predicates[0].params()[0].as_str(), Some("01234567"));
}

#[test]
fn blank_company_number_does_not_suppress_name() {
    let filter = FilterSpec::new()
        .with_company_number("   ")
        .with_company_name("Mi", SearchType::Contains);
    let plan = build(&filter);
    assert_eq!(plan.sql(), format!("{SELECT} AND company_name LIKE ?{TAIL}"));
}

#[test]
fn active_status_is_normalized() {
    for raw in ["ACTIVE", "active", "Active", "aCtIvE"] {
        let plan = build(&FilterSpec::new().with_company_status(raw));
        assert_eq!(
            plan.sql(),
            format!("{SELECT} AND company_status = ?{TAIL}")
        );
        assert_eq!(plan.params()[0], text("Active"));
    }
}

#[test]
fn other_statuses_pass_through() {
    let plan = build(&FilterSpec::new().with_company_status("dissolved"));
    assert_eq!(plan.params()[0], text("dissolved"));
}

#[test]
fn short_name_uses_prefix_only() {
    let plan = build(&FilterSpec::new().with_company_name("Mi", SearchType::Contains));
    assert_eq!(plan.sql(), format!("{SELECT} AND company_name LIKE ?{TAIL}"));
    assert_eq!(plan.params()[0], text("Mi%"));
    assert_eq!(plan.params().len(), 3);
}

#[test]
fn long_name_uses_prefix_or_word_boundary() {
    let plan = build(&FilterSpec::new().with_company_name("Microsoft", SearchType::Contains));
    assert_eq!(
        plan.sql(),
        format!("{SELECT} AND (company_name LIKE ? OR company_name LIKE ?){TAIL}")
    );
    assert_eq!(&plan.params()[..2], &[text("Microsoft%"), text("% Microsoft%")]);
    assert!(!plan.params().contains(&text("%Microsoft%")));
}

#[test]
fn name_length_counts_chars_not_bytes() {
    // Two chars, four bytes.
    let plan = build(&FilterSpec::new().with_company_name("Éé", SearchType::Contains));
    assert_eq!(plan.params()[0], text("Éé%"));
    assert_eq!(plan.params().len(), 3);
}

#[test]
fn name_boundary_is_three_chars() {
    let plan = build(&FilterSpec::new().with_company_name("IBM", SearchType::Contains));
    assert_eq!(&plan.params()[..2], &[text("IBM%"), text("% IBM%")]);
}

#[test]
fn exact_name_search() {
    let plan = build(&FilterSpec::new().with_company_name("Microsoft", SearchType::Is));
    assert_eq!(plan.sql(), format!("{SELECT} AND company_name = ?{TAIL}"));
    assert_eq!(plan.params()[0], text("Microsoft"));
}

#[test]
fn exact_search_with_short_name() {
    let plan = build(&FilterSpec::new().with_company_name("BP", SearchType::Is));
    assert_eq!(plan.sql(), format!("{SELECT} AND company_name = ?{TAIL}"));
    assert_eq!(plan.params()[0], text("BP"));
}

#[test]
fn sic_codes_drop_malformed_entries() {
    let filter = FilterSpec::new().with_sic_codes(["62020 - Computer", "bogus", "70229"]);
    let plan = build(&filter);
    assert_eq!(
        plan.sql(),
        format!("{SELECT} AND (sic_code_1_num = ? OR sic_code_1_num = ?){TAIL}")
    );
    assert_eq!(&plan.params()[..2], &[text("62020"), text("70229")]);
}

#[test]
fn sic_codes_without_numbers_emit_nothing() {
    let filter = FilterSpec::new().with_sic_codes(["bogus", "", "Software"]);
    assert!(QueryBuilder::default().predicates(&filter).is_empty());
    assert_eq!(build(&filter).sql(), format!("{SELECT}{TAIL}"));
}

#[test]
fn single_sic_code_is_still_grouped() {
    let plan = build(&FilterSpec::new().with_sic_codes([" 01110"]));
    assert_eq!(plan.sql(), format!("{SELECT} AND (sic_code_1_num = ?){TAIL}"));
    assert_eq!(plan.params()[0], text("01110"));
}

#[test]
fn postcode_location_matches_postcode_or_town() {
    let plan = build(&FilterSpec::new().with_location("SW1A 1AA"));
    assert_eq!(
        plan.sql(),
        format!("{SELECT} AND (reg_postcode LIKE ? OR reg_post_town LIKE ?){TAIL}")
    );
    assert_eq!(&plan.params()[..2], &[text("SW1A 1AA%"), text("%SW1A 1AA%")]);
}

#[test]
fn postcode_prefix_is_uppercased() {
    let plan = build(&FilterSpec::new().with_location("sw1a"));
    assert_eq!(&plan.params()[..2], &[text("SW1A%"), text("%sw1a%")]);
}

#[test]
fn town_location_matches_town_only() {
    let plan = build(&FilterSpec::new().with_location("Greater Manchester"));
    assert_eq!(plan.sql(), format!("{SELECT} AND reg_post_town LIKE ?{TAIL}"));
    assert_eq!(plan.params()[0], text("%Greater Manchester%"));
}

#[test]
fn punctuated_location_is_town() {
    let plan = build(&FilterSpec::new().with_location("St. Ives"));
    assert_eq!(plan.sql(), format!("{SELECT} AND reg_post_town LIKE ?{TAIL}"));
}

#[test]
fn one_char_location_is_ignored() {
    let plan = build(&FilterSpec::new().with_location(" L "));
    assert_eq!(plan.sql(), format!("{SELECT}{TAIL}"));
}

#[test]
fn postcode_heuristic() {
    assert!(is_postcode_like("SW1A 1AA", 8));
    assert!(is_postcode_like("M1 1AE", 8));
    assert!(is_postcode_like("Leeds", 8));
    assert!(!is_postcode_like("Greater Manchester", 8));
    assert!(!is_postcode_like("EC1A-1BB", 8));
    assert!(!is_postcode_like("   ", 8));
    // Length is measured after removing spaces.
    assert!(is_postcode_like("AB1 2 3 4 5 6", 8));
    assert!(!is_postcode_like("ABCDEFGHI", 8));
}

#[test]
fn predicates_follow_fixed_order() {
    let filter = FilterSpec::new()
        .with_company_status("active")
        .with_company_name("Acme", SearchType::Contains)
        .with_sic_codes(["62020"])
        .with_location("Leeds");
    let plan = build(&filter);
    assert_eq!(
        plan.sql(),
        format!(
            "{SELECT} AND company_status = ? \
             AND (company_name LIKE ? OR company_name LIKE ?) \
             AND (sic_code_1_num = ?) \
             AND (reg_postcode LIKE ? OR reg_post_town LIKE ?){TAIL}"
        )
    );
    assert_eq!(
        plan.params(),
        &[
            text("Active"),
            text("Acme%"),
            text("% Acme%"),
            text("62020"),
            text("LEEDS%"),
            text("%Leeds%"),
            BindValue::Int(20),
            BindValue::Int(0),
        ]
    );
}

#[test]
fn offset_is_page_minus_one_times_size() {
    let plan = QueryBuilder::default()
        .build(&FilterSpec::default(), &fields(), 3, 20)
        .unwrap();
    assert_eq!(plan.params(), &[BindValue::Int(20), BindValue::Int(40)]);
    assert_eq!(plan.params()[1].as_int(), Some(40));
    assert_eq!(plan.params()[1].as_str(), None);
}

#[test]
fn large_offsets_are_checked() {
    let builder = QueryBuilder::default();
    let plan = builder
        .build(&FilterSpec::default(), &fields(), u32::MAX, 1000)
        .unwrap();
    assert_eq!(plan.params()[1].as_int(), Some(i64::from(u32::MAX - 1) * 1000));

    let err = builder
        .build(&FilterSpec::default(), &fields(), u32::MAX, u32::MAX)
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn zero_page_or_size_is_rejected() {
    let builder = QueryBuilder::default();
    let err = builder.build(&FilterSpec::default(), &fields(), 0, 20).unwrap_err();
    assert!(err.is_validation());
    let err = builder.build(&FilterSpec::default(), &fields(), 1, 0).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn numbered_placeholders() {
    let builder =
        QueryBuilder::new(SearchConfig::new().with_placeholder_style(PlaceholderStyle::Numbered))
            .unwrap();
    let filter = FilterSpec::new()
        .with_company_status("active")
        .with_company_name("Microsoft", SearchType::Contains);
    let plan = builder.build(&filter, &fields(), 2, 10).unwrap();
    assert_eq!(
        plan.sql(),
        "SELECT company_number, company_name FROM companies WHERE 1=1 \
         AND company_status = $1 AND (company_name LIKE $2 OR company_name LIKE $3) \
         ORDER BY company_name LIMIT $4 OFFSET $5"
    );
    assert_eq!(plan.placeholder_count(), 5);
    assert_eq!(plan.params()[4], BindValue::Int(10));
}

#[test]
fn count_reuses_predicates_without_paging() {
    let filter = FilterSpec::new().with_company_name("Mi", SearchType::Contains);
    let plan = QueryBuilder::default().count(&filter).unwrap();
    assert_eq!(
        plan.sql(),
        "SELECT COUNT(*) FROM companies WHERE 1=1 AND company_name LIKE ?"
    );
    assert_eq!(plan.params(), &[text("Mi%")]);
}

#[test]
fn active_sample_query() {
    let plan = QueryBuilder::default().active_sample(20).unwrap();
    assert_eq!(
        plan.sql(),
        "SELECT company_number AS id, company_name AS name, sic_code_1 AS sic \
         FROM companies WHERE company_status = ? ORDER BY company_name LIMIT ?"
    );
    assert_eq!(plan.params(), &[text("Active"), BindValue::Int(20)]);
    assert!(QueryBuilder::default().active_sample(0).is_err());
}

#[test]
fn coverage_delegates_to_schema() {
    let plans = QueryBuilder::default().coverage(&["01234567"]).unwrap();
    assert_eq!(plans.len(), 6);
    assert!(plans.iter().all(|(_, p)| p.params().len() == 1));
}

#[test]
fn custom_schema_columns_are_used() {
    let config = SearchConfig::from_json(
        r#"{"schema": {"table": "public.company_index", "post_town": "town"}}"#,
    )
    .unwrap();
    let builder = QueryBuilder::new(config).unwrap();
    assert_eq!(builder.config().schema.post_town.as_str(), "town");
    let plan = builder
        .build(&FilterSpec::new().with_location("Greater Manchester"), &fields(), 1, 5)
        .unwrap();
    assert_eq!(
        plan.sql(),
        "SELECT company_number, company_name FROM public.company_index WHERE 1=1 \
         AND town LIKE ? ORDER BY company_name LIMIT ? OFFSET ?"
    );
}

#[test]
fn builder_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryBuilder>();

    let builder = std::sync::Arc::new(QueryBuilder::default());
    let handles: Vec<_> = (1..=4u32)
        .map(|page| {
            let builder = builder.clone();
            std::thread::spawn(move || {
                builder
                    .build(&FilterSpec::default(), &fields(), page, 10)
                    .unwrap()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        let plan = h.join().unwrap();
        assert_eq!(plan.params()[1], BindValue::Int(i as i64 * 10));
    }
}
