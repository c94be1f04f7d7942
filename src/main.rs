use clap::Parser;
use sofia_client::config::cli::{BulkArgs, Command, FeedbackArgs, StarArgs, TranslateArgs};
use sofia_client::core::bulk::BulkTranslationForm;
use sofia_client::core::feedback::FeedbackOutcome;
use sofia_client::core::flow::FlowPhase;
use sofia_client::core::render;
use sofia_client::core::SofiaApi;
use sofia_client::core::single::SingleTranslationForm;
use sofia_client::core::navigation::Tab;
use sofia_client::core::star::{StarForm, STAR_GUIDE};
use sofia_client::utils::error::ErrorSeverity;
use sofia_client::utils::{logger, validation::Validate};
use sofia_client::{
    ApiClient, ApiError, BulkTranslationFlow, CliConfig, ClientConfig, FeedbackDialog, FormFeedbackSink,
    LocalStorage, Navigation, ResolvedConfig, SingleTranslationFlow, SofiaError,
    StarConversionFlow, StdoutClipboard,
};
use std::io::Read;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), SofiaError> {
    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            ClientConfig::from_file(path)?
        }
        None => ClientConfig::default(),
    };
    file_config.validate()?;
    let config = file_config.resolve(cli.api_base_url.as_deref())?;
    tracing::debug!("Resolved config: {:?}", config);

    match cli.command {
        Command::Translate(args) => translate(&config, args).await,
        Command::Bulk(args) => bulk(&config, args).await,
        Command::Star(args) => star(&config, args).await,
        Command::Feedback(args) => feedback(&config, args).await,
        Command::Tabs => {
            let navigation = Navigation::default();
            println!("{}", render::render_navigation(&navigation));
            for tab in navigation.tabs() {
                println!("\n{}\n  {}", tab.name(), tab.description());
                match tab {
                    Tab::CvPointConverter => {
                        println!("\nTarget domains:\n{}", render::render_domains())
                    }
                    Tab::StarFramework => println!("\n{}", STAR_GUIDE),
                    Tab::JdCompatibility => {}
                }
            }
            Ok(())
        }
    }
}

fn report_failure(error: Option<&ApiError>) -> Result<(), SofiaError> {
    let error = error.cloned().unwrap_or_else(|| ApiError::Transport {
        message: "An error occurred".to_string(),
    });
    Err(error.into())
}

async fn translate(config: &ResolvedConfig, args: TranslateArgs) -> Result<(), SofiaError> {
    let api = ApiClient::new(&config.api_base_url)?;
    let mut flow = SingleTranslationFlow::with_form(SingleTranslationForm {
        cv_point: args.cv_point,
        target_domain: Some(args.domain),
        job_description: args.job_description.unwrap_or_default(),
    });

    eprintln!("Translating...");
    match flow.submit(&api).await? {
        FlowPhase::Succeeded => {
            if args.copy {
                flow.copy_result(&StdoutClipboard)?;
            } else if let Some(result) = flow.result() {
                println!("{}", render::render_translation(result));
            }
            Ok(())
        }
        _ => report_failure(flow.api_error()),
    }
}

fn read_points(input: Option<&str>) -> Result<String, SofiaError> {
    match input {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

async fn bulk(config: &ResolvedConfig, args: BulkArgs) -> Result<(), SofiaError> {
    let api = ApiClient::new(&config.api_base_url)?;
    let mut flow = BulkTranslationFlow::with_form(BulkTranslationForm {
        raw_points: read_points(args.input.as_deref())?,
        target_domain: Some(args.domain),
        job_description: args.job_description.unwrap_or_default(),
    });

    let (ticket, request) = flow.begin_submit()?;
    eprintln!("{}", render::bulk_progress(&flow));
    let outcome = api.translate_bulk(&request).await;
    flow.settle(ticket, &request, outcome);
    if flow.phase() != FlowPhase::Succeeded {
        return report_failure(flow.api_error());
    }

    if let Some(row_number) = args.expand {
        let id = row_number
            .checked_sub(1)
            .and_then(|index| flow.rows().get(index))
            .map(|row| row.id);
        match id {
            Some(id) => {
                flow.toggle_row(id);
            }
            None => tracing::warn!("No row {} to expand", row_number),
        }
    }
    println!("{}", render::render_bulk(&flow));

    if args.export {
        let output_path = args.output_path.unwrap_or_else(|| config.output_path.clone());
        let storage = LocalStorage::new(output_path);
        let path = flow.export_to(&storage).await?;
        println!("📁 Results exported to: {}", path);
    }
    Ok(())
}

async fn star(config: &ResolvedConfig, args: StarArgs) -> Result<(), SofiaError> {
    let api = ApiClient::new(&config.api_base_url)?;
    let mut flow = StarConversionFlow::with_form(StarForm {
        cv_point: args.cv_point,
        context: args.context.unwrap_or_default(),
    });

    eprintln!("Converting to STAR Format...");
    match flow.submit(&api).await? {
        FlowPhase::Succeeded => {
            if args.copy {
                flow.copy_result(&StdoutClipboard)?;
            } else if let Some(view) = flow.view() {
                println!("{}", render::render_star(&view));
            }
            Ok(())
        }
        _ => report_failure(flow.api_error()),
    }
}

async fn feedback(config: &ResolvedConfig, args: FeedbackArgs) -> Result<(), SofiaError> {
    let origin = args
        .feedback_origin
        .unwrap_or_else(|| config.feedback_origin.clone());
    let sink = FormFeedbackSink::new(&origin)?;

    let mut dialog = FeedbackDialog::new();
    dialog.open();
    dialog.set_text(args.text);

    match dialog.submit(&sink).await {
        FeedbackOutcome::Sent => println!("Thanks for your feedback!"),
        FeedbackOutcome::Skipped => eprintln!("Nothing to send: feedback is empty"),
        // Already logged; feedback problems are never reported as failures.
        FeedbackOutcome::Dropped => {}
    }
    Ok(())
}
