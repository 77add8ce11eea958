use chrono::{TimeZone, Utc};
use reportbook::{
    DataValidator, Entity, EntityType, ErrorManager, FieldValue, FormData, IndicatorEngine,
    IndicatorError, IndicatorRow, IndicatorSet, IndicatorSource, MemoryRegistry, MemorySource,
    OptionOverrides, Period, PeriodKind, Report, ReportStatus, Reporting, Settings,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct SiteTraffic<'a> {
    source: &'a MemorySource,
}

impl SiteTraffic<'_> {
    fn visits(&self, entity: &Entity, period: &Period) -> Result<Decimal, IndicatorError> {
        self.source.indicator_value("visits", entity, period)
    }
}

impl IndicatorSet for SiteTraffic<'_> {
    fn rows() -> Vec<IndicatorRow<Self>> {
        vec![IndicatorRow::new("visits", Self::visits).reference()]
    }
}

fn library() -> Entity {
    Entity::new("central", "central library", EntityType::new("library", "Library"))
}

fn january() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()
}

#[test]
fn visits_are_their_own_reference() {
    let entity = library();
    let mut reporting = Reporting::new(Settings::default(), MemoryRegistry::new());
    let periods = reporting
        .periods()
        .series(PeriodKind::Month, january(), 2)
        .unwrap();
    let (jan, feb) = (&periods[0], &periods[1]);

    let source = MemorySource::new()
        .with("visits", &entity, jan, dec!(40))
        .with("visits", &entity, feb, Decimal::ZERO);
    let set = SiteTraffic { source: &source };

    let overrides = OptionOverrides::new().with_percentage(true);
    let table = reporting
        .engine(&set, &entity, &periods, &overrides)
        .unwrap()
        .build()
        .unwrap();

    let visits = table.line("visits").unwrap();
    assert_eq!(visits.value(jan.id()), Some(dec!(40)));
    assert_eq!(visits.percent(jan.id()), Some(Decimal::ONE));
    assert_eq!(visits.value(feb.id()), Some(Decimal::ZERO));
    assert_eq!(visits.percent(feb.id()), Some(Decimal::ONE));
    assert!(table.diagnostics.is_empty());
}

#[test]
fn deployment_switches_sit_under_caller_overrides() {
    let entity = library();
    let settings = Settings::from_toml_str(
        r#"
        [table]
        with_total = true
        with_percentage = true
        "#,
    )
    .unwrap();
    let mut reporting = Reporting::new(settings, MemoryRegistry::new());
    let source = MemorySource::new();
    let set = SiteTraffic { source: &source };

    let table = reporting
        .table(
            &set,
            &entity,
            PeriodKind::Quarter,
            january(),
            4,
            &OptionOverrides::new().with_percentage(false),
        )
        .unwrap();

    assert_eq!(table.columns.len(), 4);
    assert_eq!(table.columns[3].name, "Q4 2024");
    let visits = table.line("visits").unwrap();
    assert_eq!(visits.total.unwrap().value, Some(Decimal::ZERO));
    assert!(visits.values.values().all(|cell| cell.percent.is_none()));
}

#[test]
fn serialized_table_is_keyed_by_period_id() {
    let entity = library();
    let mut reporting = Reporting::new(Settings::default(), MemoryRegistry::new());
    let periods = reporting
        .periods()
        .series(PeriodKind::Month, january(), 1)
        .unwrap();
    let source = MemorySource::new().with("visits", &entity, &periods[0], dec!(12.5));
    let set = SiteTraffic { source: &source };

    let engine = IndicatorEngine::new(&set, &entity, &periods, &OptionOverrides::new()).unwrap();
    let json = serde_json::to_value(engine.build().unwrap()).unwrap();

    let id = periods[0].id().to_string();
    assert_eq!(json["columns"][0]["name"], "01 2024");
    assert_eq!(json["lines"][0]["name"], "visits");
    assert_eq!(json["lines"][0]["values"][id.as_str()]["value"], "12.5");
    assert!(json["lines"][0]["values"][id.as_str()]["percent"].is_null());
    assert!(json["lines"][0].get("total").is_none());
}

/// Requires a visitor count and rejects negative ones.
struct Attendance;

impl DataValidator for Attendance {
    fn required_fields(&self) -> &[&str] {
        &["visitors"]
    }

    fn validate(&self, data: &FormData, errors: &mut ErrorManager) {
        if let Ok(Some(visitors)) = data.get_decimal("visitors") {
            if visitors.is_sign_negative() {
                errors.add(format!("{} cannot be negative", data.field_name("visitors")));
            }
        }
    }
}

#[test]
fn validated_form_drives_the_report_status() {
    let entity = library();
    let mut reporting = Reporting::new(Settings::default(), MemoryRegistry::new());
    let period = reporting
        .periods()
        .find_or_create_for_instant(PeriodKind::Month, january())
        .unwrap();

    let mut report = Report::create(&period, &entity, "clerk");
    assert_eq!(report.status(), ReportStatus::Unsaved);
    let receipt = report
        .finalize(&|report: &Report| format!("R-{}-{}", report.period, report.created_by))
        .unwrap()
        .to_string();
    assert_eq!(receipt, format!("R-{}-clerk", period.id()));

    let mut form = FormData::new().with_label("visitors", "Visitors");
    form.set("visitors", FieldValue::Decimal(dec!(-3)));
    form.record_conversion_error("opening_hours", "ten");

    assert!(!form.is_valid(&Attendance));
    assert!(form.errors().all().contains(&"Visitors cannot be negative"));
    assert!(form.errors().has_category(reportbook::CONVERSION_CATEGORY));
    assert_eq!(form.errors().count(), 2);
    assert_eq!(
        report.apply_validation(form.errors().count()).unwrap(),
        ReportStatus::Erroneous
    );
}
