//! Line-oriented demo REPL.
//!
//! Types one utterance per line; the orchestrator replies on stdout. `/form
//! <screen>` starts a voice form walk for a catalog screen, `/quit` exits.
//! Useful for exercising the dialogue loop without a host app.

use tokio::io::{AsyncBufReadExt, BufReader};

use agrivoice::agent::provider::HttpTextGenerator;
use agrivoice::agent::Orchestrator;
use agrivoice::form::FormCatalog;
use agrivoice::session::screen::ScreenContext;
use agrivoice::session::Session;
use agrivoice::{AgentError, Settings};

#[tokio::main]
async fn main() -> Result<(), AgentError> {
    agrivoice::logging::init();

    let settings = Settings::from_env()?;
    tracing::info!(
        provider = settings.provider_url.as_deref().unwrap_or("<canned only>"),
        language = %settings.default_language,
        "Starting AgriVoice REPL v{}",
        env!("CARGO_PKG_VERSION")
    );

    let generator = HttpTextGenerator::from_settings(&settings)?
        .map(|g| Box::new(g) as Box<dyn agrivoice::agent::TextGenerator>);

    let catalog = FormCatalog::with_marketplace_forms();
    let mut session = Session::new();
    let mut agent = Orchestrator::new(generator, &settings.default_language);

    println!("AgriVoice demo. /form AddCrop | /form Register | /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" {
            break;
        }
        if let Some(screen) = line.strip_prefix("/form ") {
            match catalog.get(screen) {
                Some(form) => {
                    session.screen.set_context(
                        ScreenContext::new(screen, screen).with_form(
                            &form.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
                        ),
                    );
                    let reply = agent.begin_form(&mut session, form.clone());
                    println!("agent> {}", reply.text);
                }
                None => println!("agent> no form registered for screen {:?}", screen),
            }
            continue;
        }

        let reply = agent.process_input(&mut session, line).await;
        if !reply.text.is_empty() {
            println!("agent> {}", reply.text);
        }
        if let Some(action) = reply.action {
            println!("action> {}", serde_json::to_string(&action)?);
        }
        if let Some(progress) = reply.progress {
            println!("progress> {:.0}%", progress);
        }
    }

    Ok(())
}
