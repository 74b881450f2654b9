use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    DateRange, Engine, EngineError, ExpenseCmd, ExpensePatch, Granularity, IncomeCmd,
    IncomePatch, MoneyCents, reconcile,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_example(engine: &Engine) -> Uuid {
    engine
        .income(IncomeCmd::new(500_00, date(2025, 1, 10), "Tuition", "fees"))
        .await
        .unwrap();
    engine
        .income(IncomeCmd::new(300_00, date(2025, 2, 5), "Admission", "fees"))
        .await
        .unwrap();
    engine
        .expense(ExpenseCmd::new(200_00, date(2025, 1, 15), "supplies").payee("Stationers"))
        .await
        .unwrap()
        .id
}

fn series(summary: &engine::Summary) -> Vec<(String, i64, i64, i64)> {
    reconcile(&summary.income, &summary.expense)
        .iter()
        .map(|r| {
            (
                r.period.to_string(),
                r.income.cents(),
                r.expense.cents(),
                r.net.cents(),
            )
        })
        .collect()
}

#[tokio::test]
async fn example_scenario_reconciles_and_survives_delete() {
    let (engine, _db) = engine_with_db().await;
    let expense_id = seed_example(&engine).await;

    let summary = engine
        .summary(Granularity::Month, &DateRange::default())
        .await
        .unwrap();
    assert_eq!(
        series(&summary),
        [
            ("2025-01".to_string(), 500_00, 200_00, 300_00),
            ("2025-02".to_string(), 300_00, 0, 300_00),
        ]
    );
    assert_eq!(summary.overall.income_total, MoneyCents::new(800_00));
    assert_eq!(summary.overall.expense_total, MoneyCents::new(200_00));
    assert_eq!(summary.overall.net, MoneyCents::new(600_00));

    engine.delete_expense(expense_id).await.unwrap();

    let summary = engine
        .summary(Granularity::Month, &DateRange::default())
        .await
        .unwrap();
    assert_eq!(series(&summary)[0], ("2025-01".to_string(), 500_00, 0, 500_00));
    assert_eq!(summary.overall.net, MoneyCents::new(800_00));
}

#[tokio::test]
async fn create_then_delete_restores_period_total() {
    let (engine, _db) = engine_with_db().await;
    seed_example(&engine).await;

    let before = engine
        .summary(Granularity::Month, &DateRange::default())
        .await
        .unwrap();
    let jan = |s: &engine::Summary| {
        s.income
            .iter()
            .find(|a| a.period.to_string() == "2025-01")
            .map(|a| a.total.cents())
            .unwrap_or(0)
    };

    let created = engine
        .income(IncomeCmd::new(123_45, date(2025, 1, 28), "Donation", "gifts"))
        .await
        .unwrap();
    let during = engine
        .summary(Granularity::Month, &DateRange::default())
        .await
        .unwrap();
    assert_eq!(jan(&during), jan(&before) + 123_45);

    engine.delete_income(created.id).await.unwrap();
    let after = engine
        .summary(Granularity::Month, &DateRange::default())
        .await
        .unwrap();
    assert_eq!(jan(&after), jan(&before));
}

#[tokio::test]
async fn date_window_applies_to_lists_and_summary_alike() {
    let (engine, _db) = engine_with_db().await;
    seed_example(&engine).await;

    let range = DateRange::new(Some(date(2025, 1, 1)), Some(date(2025, 1, 31))).unwrap();
    let incomes = engine.list_incomes(&range).await.unwrap();
    let expenses = engine.list_expenses(&range).await.unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(expenses.len(), 1);

    let summary = engine.summary(Granularity::Year, &range).await.unwrap();
    assert_eq!(summary.overall.income_count, 1);
    assert_eq!(summary.overall.expense_count, 1);
    assert_eq!(summary.overall.net, MoneyCents::new(300_00));
    assert_eq!(summary.income.len(), 1);
    assert_eq!(summary.income[0].period.to_string(), "2025");
}

#[tokio::test]
async fn lists_are_ordered_by_date() {
    let (engine, _db) = engine_with_db().await;
    for day in [20, 3, 11] {
        engine
            .income(IncomeCmd::new(100, date(2025, 4, day), "Fees", "fees"))
            .await
            .unwrap();
    }
    let days: Vec<NaiveDate> = engine
        .list_incomes(&DateRange::default())
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.date)
        .collect();
    assert_eq!(days, [date(2025, 4, 3), date(2025, 4, 11), date(2025, 4, 20)]);
}

#[tokio::test]
async fn update_is_partial_and_can_clear_optional_text() {
    let (engine, _db) = engine_with_db().await;
    let expense = engine
        .expense(
            ExpenseCmd::new(10_00, date(2025, 3, 1), "maintenance")
                .payee("Plumber")
                .notes("sink"),
        )
        .await
        .unwrap();

    let updated = engine
        .update_expense(
            expense.id,
            ExpensePatch {
                amount_minor: Some(12_50),
                payee: Some(String::new()),
                ..ExpensePatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.amount, MoneyCents::new(12_50));
    assert_eq!(updated.payee, None);
    assert_eq!(updated.notes.as_deref(), Some("sink"));
    assert_eq!(updated.category, "maintenance");

    let stored = engine.list_expenses(&DateRange::default()).await.unwrap();
    assert_eq!(stored, vec![updated]);
}

#[tokio::test]
async fn invalid_writes_are_rejected_before_storage() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .income(IncomeCmd::new(-1, date(2025, 1, 1), "Fees", "fees"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .income(IncomeCmd::new(100, date(2025, 1, 1), "   ", "fees"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("source must not be empty".to_string())
    );

    let income = engine
        .income(IncomeCmd::new(100, date(2025, 1, 1), "Fees", "fees"))
        .await
        .unwrap();
    let err = engine
        .update_income(
            income.id,
            IncomePatch {
                category: Some(String::new()),
                ..IncomePatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let stored = engine.list_incomes(&DateRange::default()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, income.id);
    assert_eq!(stored[0].category, "fees");
    assert!(
        engine
            .list_expenses(&DateRange::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (engine, _db) = engine_with_db().await;
    let missing = Uuid::new_v4();

    assert!(matches!(
        engine.delete_income(missing).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine
            .update_expense(missing, ExpensePatch::default())
            .await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn zero_amounts_are_accepted() {
    let (engine, _db) = engine_with_db().await;
    let income = engine
        .income(IncomeCmd::new(0, date(2025, 1, 1), "Waiver", "fees"))
        .await
        .unwrap();
    assert!(income.amount.is_zero());
}
