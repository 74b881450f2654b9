use std::{fs, path::Path};

use clap::Parser;
use dashboard::{
    Client, CsvWriter, Exporter, FilterCriteria, LedgerController, Result, Store, Table,
    TableWriter,
    config::{self, Cli, Command, DashboardConfig, Window},
    controller::Consistency,
};

fn criteria(window: &Window) -> FilterCriteria {
    FilterCriteria {
        from: window.from,
        to: window.to,
        granularity: window.granularity,
    }
}

fn print_table(table: &Table) {
    println!("{}", table.title);
    println!("  {}", table.headers.join(" | "));
    for row in &table.rows {
        println!("  {}", row.join(" | "));
    }
    println!();
}

fn write_csv(dir: &Path, name: &str, table: &Table) -> Result<()> {
    let file = fs::File::create(dir.join(name))?;
    let mut writer = CsvWriter::new(file);
    writer.write_table(table)?;
    tracing::info!("wrote {}", dir.join(name).display());
    Ok(())
}

async fn load<S: Store>(
    settings: &DashboardConfig,
    store: S,
    window: &Window,
) -> Result<LedgerController<S>> {
    let mut controller = LedgerController::new(store);
    controller.incomes_mut().set_page_size(settings.page_size);
    controller.expenses_mut().set_page_size(settings.page_size);
    controller.set_criteria(criteria(window)).await?;
    if controller.consistency() == Consistency::Stale {
        tracing::warn!("{}", dashboard::controller::STALE_MESSAGE);
    }
    Ok(controller)
}

async fn summary<S: Store>(settings: &DashboardConfig, store: S, window: &Window) -> Result<()> {
    let controller = load(settings, store, window).await?;
    let today = settings.today()?;

    print_table(&Exporter::overall_table(&controller.summary().overall));
    print_table(&Exporter::period_table(controller.reconciled()));

    let mut cards = Exporter::period_table(&controller.period_cards(today));
    cards.title = format!("Period cards ({today})");
    print_table(&cards);
    Ok(())
}

async fn export<S: Store>(
    settings: &DashboardConfig,
    store: S,
    window: &Window,
    dir: &Path,
) -> Result<()> {
    let controller = load(settings, store, window).await?;
    fs::create_dir_all(dir)?;

    let incomes = controller.incomes().filtered();
    let expenses = controller.expenses().filtered();
    write_csv(dir, "incomes.csv", &Exporter::income_table(&incomes))?;
    write_csv(dir, "expenses.csv", &Exporter::expense_table(&expenses))?;
    write_csv(
        dir,
        "overall.csv",
        &Exporter::overall_table(&controller.summary().overall),
    )?;
    write_csv(
        dir,
        "periods.csv",
        &Exporter::period_table(controller.reconciled()),
    )?;

    let document = Exporter::print_document(
        &controller.criteria(),
        &controller.summary().overall,
        controller.reconciled(),
        settings.today()?,
    );
    fs::write(dir.join("report.json"), serde_json::to_string_pretty(&document)?)?;
    tracing::info!("wrote {}", dir.join("report.json").display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("dashboard={level}", level = settings.level))
        .init();

    let client = Client::new(&settings.base_url)?;
    match &cli.command {
        Command::Summary(window) => summary(&settings, client, window).await,
        Command::Export { window, dir } => export(&settings, client, window, dir).await,
    }
}
