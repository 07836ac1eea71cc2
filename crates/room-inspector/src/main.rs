//! room-inspector CLI
//!
//! Browse and edit the tables of a Room / SQLite database, either one
//! command at a time or interactively with `explore`.

use std::io::Write;

use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use room_inspector::config::{DatabaseArgs, OutputFormat};
use room_inspector::session::{Reply, Session};
use room_inspector::view::TableView;
use room_inspector_core::{zip_assignments, zip_columns, StatementBuilder};
use room_inspector_sqlite::{Inspector, QueryOutcome};

/// Browse and edit the tables of an Android Room database.
#[derive(Parser)]
#[command(name = "room-inspector")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    db: DatabaseArgs,

    /// Output format for tables.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a generated statement without executing it.
    Sql {
        #[command(subcommand)]
        statement: Statement,
    },

    #[command(flatten)]
    Database(DatabaseCommand),
}

/// Subcommands that open the database.
#[derive(Subcommand)]
enum DatabaseCommand {
    /// List the user tables.
    Tables,

    /// Show the columns of a table.
    Columns(TableArg),

    /// Show every row of a table.
    Rows(TableArg),

    /// Insert a row.
    Insert(InsertArgs),

    /// Replace the values of the rows matching the old values.
    Update(UpdateArgs),

    /// Delete the rows matching the given values.
    Delete(DeleteArgs),

    /// Delete every row of a table.
    Clear(TableArg),

    /// Drop a table.
    Drop(TableArg),

    /// Run a statement.
    Query {
        /// SQL to run.
        sql: String,
    },

    /// Walk the database interactively.
    Explore,
}

#[derive(Subcommand)]
enum Statement {
    /// Statement listing the user tables.
    ListTables,
    /// Statement listing the columns of a table.
    ListColumns(TableArg),
    /// Statement selecting every row of a table.
    ListRows(TableArg),
    /// Statement dropping a table.
    Drop(TableArg),
    /// Statement deleting every row of a table.
    Clear(TableArg),
    /// Statement inserting a row.
    Insert(InsertArgs),
    /// Statement updating a row.
    Update(UpdateArgs),
    /// Statement deleting a row.
    Delete(DeleteArgs),
}

#[derive(Args)]
struct TableArg {
    /// Table name.
    table: String,
}

#[derive(Args)]
struct InsertArgs {
    /// Table name.
    table: String,

    /// Values, in column order.
    #[arg(required = true)]
    values: Vec<String>,
}

#[derive(Args)]
struct UpdateArgs {
    /// Table name.
    table: String,

    /// Column name (repeat once per column).
    #[arg(short, long = "column", required = true)]
    columns: Vec<String>,

    /// Current value (repeat once per column).
    #[arg(short, long = "old", required = true)]
    old: Vec<String>,

    /// Replacement value (repeat once per column).
    #[arg(short, long = "new", required = true)]
    new: Vec<String>,
}

#[derive(Args)]
struct DeleteArgs {
    /// Table name.
    table: String,

    /// Column name (repeat once per column).
    #[arg(short, long = "column", required = true)]
    columns: Vec<String>,

    /// Value to match (repeat once per column).
    #[arg(short, long = "value", required = true)]
    values: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = cli.db.options();

    let command = match cli.command {
        Commands::Sql { statement } => {
            let builder = StatementBuilder::new(options.quoting);
            println!("{}", build_statement(builder, &statement)?);
            return Ok(());
        }
        Commands::Database(command) => command,
    };

    let inspector = Inspector::connect(&cli.db.database, &options).await?;
    let format = cli.format;

    match command {
        DatabaseCommand::Tables => {
            let tables = inspector.tables().await?;
            println!("{}", TableView::list("table", &tables).render(format)?);
        }

        DatabaseCommand::Columns(TableArg { table }) => {
            let columns = inspector.columns(&table).await?;
            println!("{}", TableView::schema(&columns).render(format)?);
        }

        DatabaseCommand::Rows(TableArg { table }) => {
            let set = inspector.rows(&table).await?;
            println!("{}", TableView::from(set).render(format)?);
        }

        DatabaseCommand::Insert(InsertArgs { table, values }) => {
            let affected = inspector.insert_row(&table, &values).await?;
            info!(table = %table, rows = affected, "Inserted");
        }

        DatabaseCommand::Update(UpdateArgs {
            table,
            columns,
            old,
            new,
        }) => {
            let affected = inspector.update_row(&table, &columns, &old, &new).await?;
            info!(table = %table, rows = affected, "Updated");
        }

        DatabaseCommand::Delete(DeleteArgs {
            table,
            columns,
            values,
        }) => {
            let affected = inspector.delete_row(&table, &columns, &values).await?;
            info!(table = %table, rows = affected, "Deleted");
        }

        DatabaseCommand::Clear(TableArg { table }) => {
            inspector.clear_table(&table).await?;
        }

        DatabaseCommand::Drop(TableArg { table }) => {
            inspector.drop_table(&table).await?;
        }

        DatabaseCommand::Query { sql } => match inspector.run_query(&sql).await? {
            QueryOutcome::Rows(set) => println!("{}", TableView::from(set).render(format)?),
            QueryOutcome::Affected { rows } => println!("{rows} row(s) affected"),
        },

        DatabaseCommand::Explore => {
            let session = Session::new(inspector, cli.db.display_name()).format(format);
            repl(session).await?;
        }
    }

    Ok(())
}

fn build_statement(builder: StatementBuilder, statement: &Statement) -> anyhow::Result<String> {
    let sql = match statement {
        Statement::ListTables => builder.list_tables(),
        Statement::ListColumns(TableArg { table }) => builder.list_columns(table),
        Statement::ListRows(TableArg { table }) => builder.list_rows(table),
        Statement::Drop(TableArg { table }) => builder.drop_table(table),
        Statement::Clear(TableArg { table }) => builder.clear_table(table),
        Statement::Insert(InsertArgs { table, values }) => builder.insert_row(table, values),
        Statement::Update(UpdateArgs {
            table,
            columns,
            old,
            new,
        }) => builder.update_row(table, &zip_assignments(columns, old, new)?),
        Statement::Delete(DeleteArgs {
            table,
            columns,
            values,
        }) => builder.delete_row(table, &zip_columns(columns, values)?),
    };
    Ok(sql)
}

async fn repl(mut session: Session) -> anyhow::Result<()> {
    info!(database = %session.name(), "Type `help` for commands");
    println!("{}", session.render_screen().await?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", session.prompt());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match session.handle_line(&line).await {
            Ok(Reply::Output(text)) if text.is_empty() => {}
            Ok(Reply::Output(text)) => println!("{text}"),
            Ok(Reply::Quit) => break,
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    Ok(())
}
