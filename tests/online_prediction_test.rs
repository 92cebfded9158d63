use churn_predict::core::online::{predict_customer, render_text};
use churn_predict::domain::customer::{
    Contract, InternetAddon, InternetService, PaymentMethod, YesNo,
};
use churn_predict::{ChurnModel, CustomerProfile};
use std::path::Path;

fn demo_model() -> ChurnModel {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/model.json");
    ChurnModel::from_file(path).unwrap()
}

fn risky_customer() -> CustomerProfile {
    CustomerProfile {
        internetservice: InternetService::FiberOptic,
        onlinesecurity: InternetAddon::No,
        techsupport: InternetAddon::No,
        contract: Contract::MonthToMonth,
        paperlessbilling: YesNo::Yes,
        paymentmethod: PaymentMethod::ElectronicCheck,
        tenure: 1,
        monthlycharges: 85.0,
        ..Default::default()
    }
}

fn loyal_customer() -> CustomerProfile {
    CustomerProfile {
        partner: YesNo::Yes,
        internetservice: InternetService::Dsl,
        onlinesecurity: InternetAddon::Yes,
        techsupport: InternetAddon::Yes,
        contract: Contract::TwoYear,
        paperlessbilling: YesNo::No,
        paymentmethod: PaymentMethod::BankTransfer,
        tenure: 60,
        monthlycharges: 60.0,
        ..Default::default()
    }
}

#[test]
fn test_risky_customer_is_flagged() {
    let prediction = predict_customer(&demo_model(), &risky_customer(), 0.5).unwrap();

    assert!(prediction.churn);
    assert!(prediction.risk_score > 0.5 && prediction.risk_score < 1.0);
    assert!(render_text(&prediction).contains("Churn Risk: Yes"));
}

#[test]
fn test_loyal_customer_is_not_flagged() {
    let prediction = predict_customer(&demo_model(), &loyal_customer(), 0.5).unwrap();

    assert!(!prediction.churn);
    assert!(render_text(&prediction).contains("Churn Risk: No"));
}

#[test]
fn test_explicit_total_charges_changes_nothing_for_zero_weight() {
    // 範例模型中 totalcharges 權重為 0
    let model = demo_model();
    let derived = predict_customer(&model, &risky_customer(), 0.5).unwrap();
    let explicit = predict_customer(
        &model,
        &CustomerProfile {
            totalcharges: Some(9999.0),
            ..risky_customer()
        },
        0.5,
    )
    .unwrap();

    assert!((derived.risk_score - explicit.risk_score).abs() < 1e-12);
}

#[test]
fn test_threshold_out_of_range_is_rejected() {
    assert!(predict_customer(&demo_model(), &risky_customer(), 0.0).is_err());
}
