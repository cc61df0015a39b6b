use zakat_engine::prelude::*;

#[test]
fn test_portfolio_does_not_join_categories() {
    // Two trade lines of 5,000 each stay below the 7,140 nisab individually.
    // Their combined 10,000 would clear it, but each line is assessed alone.
    let settings = NisabSettings::default();
    let portfolio = ZakatPortfolio::new()
        .add(NetValueAssets::new().market_value(5000).label("Stall"))
        .add(NetValueAssets::new().sector(NetValueSector::Industrial).market_value(5000).label("Workshop"));

    let result = portfolio.calculate_total(&settings);
    assert_eq!(result.total_zakat, Decimal::ZERO);
    assert_eq!(result.payable().count(), 0);
}

#[test]
fn test_portfolio_sums_currency_lines() {
    let settings = NisabSettings::default();
    let salary = SalaryZakatCalculator::new().income(10000).label("Salary");
    let salary_id = salary.id;

    let portfolio = ZakatPortfolio::new()
        .add(salary)
        .add(NetValueAssets::new().market_value(20000).operating_costs(4000))
        .add(ProduceAssets::new().for_trade(true).market_value(8000));

    let result = portfolio.calculate_total(&settings);
    // 2020.2 + 400 + 200
    assert_eq!(result.total_zakat, dec!(2620.2));
    assert!(result.unit_consistent);
    assert_eq!(combined_total_checked(&result.line_items), Ok(dec!(2620.2)));

    let salary_line = result.get(salary_id).expect("salary line present");
    assert_eq!(salary_line.category, ZakatCategory::Salary);
    assert_eq!(salary_line.label.as_deref(), Some("Salary"));
}

#[test]
fn test_mixed_units_are_added_blindly_but_flagged() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let settings = NisabSettings::default();
    let portfolio = ZakatPortfolio::new()
        .add(NetValueAssets::new().market_value(20000))
        .add(ProduceAssets::new().quantity_kg(700))
        .add(LivestockAssets::new().species(LivestockSpecies::Camels).count(130));

    let result = portfolio.calculate_total(&settings);
    // 500 currency + 70 kg + 3 head
    assert_eq!(combined_total(&result.line_items), dec!(573));
    assert_eq!(result.total_zakat, dec!(573));
    assert!(!result.unit_consistent);
    assert!(matches!(
        combined_total_checked(&result.line_items),
        Err(ZakatError::UnitMismatch { expected: ZakatUnit::Currency, found: ZakatUnit::Kilograms })
    ));
}

#[test]
fn test_in_kind_lines_converted_before_summing() {
    let settings = NisabSettings::default();
    let portfolio = ZakatPortfolio::new()
        .add(NetValueAssets::new().market_value(20000))
        .add(ProduceAssets::new().quantity_kg(700));

    let mut result = portfolio.calculate_total(&settings);
    for item in result.line_items.iter_mut() {
        if item.unit() == ZakatUnit::Kilograms {
            item.result = item.result.clone().in_currency(dec!(3));
        }
    }
    // 500 + 70 kg at 3 per kg
    assert_eq!(combined_total_checked(&result.line_items), Ok(dec!(710)));
}

#[test]
fn test_recalculates_on_new_settings() {
    let portfolio = ZakatPortfolio::new().add(NetValueAssets::new().market_value(8000));

    let silver = portfolio.calculate_total(&NisabSettings::default());
    assert_eq!(silver.total_zakat, dec!(200));

    let gold = portfolio.calculate_total(&NisabSettings::new(NisabMethod::Gold));
    assert_eq!(gold.total_zakat, Decimal::ZERO);

    // Same settings, same result.
    assert_eq!(portfolio.calculate_total(&NisabSettings::default()), silver);
}

#[test]
fn test_portfolio_result_serializes() {
    let result = ZakatPortfolio::new()
        .add(NetValueAssets::new().market_value(20000))
        .calculate_total(&NisabSettings::default());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["totalZakat"], "500.000");
    assert_eq!(json["unitConsistent"], true);
    assert_eq!(json["lineItems"][0]["category"], "trade");
    assert_eq!(json["lineItems"][0]["result"]["unit"], "currency");
}

#[test]
fn test_restored_ids_are_kept() {
    let id = uuid::Uuid::new_v4();
    let result = ZakatPortfolio::new()
        .add(LivestockAssets::new().species(LivestockSpecies::SheepGoats).count(45).with_id(id))
        .calculate_total(&NisabSettings::default());

    let line = result.get(id).expect("restored id");
    assert_eq!(line.category, ZakatCategory::Livestock);
    assert_eq!(line.result.total_zakat, dec!(1));
}
