use anyhow::Context;
use clap::{Parser, Subcommand};
use pdfchat_session::{
    ChatSession, FileStore, HttpRelayClient, KeyPress, KeyValueStore, PdfFile, SessionError,
    View, SOURCE_ID_KEY,
};
use pdfchat_types::{Role, SourceId};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Session = ChatSession<HttpRelayClient, FileStore>;

#[derive(Parser)]
#[command(name = "pdfchat")]
#[command(about = "Chat with a PDF through a running PDF Chat server")]
struct Cli {
    /// Base URL of the PDF Chat server
    #[arg(long, env = "PDFCHAT_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,
    /// File in which the current source id is kept between runs
    #[arg(long, env = "PDFCHAT_STATE_FILE", default_value = ".pdfchat-state.json")]
    state_file: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a PDF and remember its source id
    Upload {
        /// Path to the PDF file
        path: PathBuf,
    },
    /// Ask one question about the current document
    Ask {
        /// Question text
        message: String,
        /// Source id to ask about (defaults to the last uploaded document)
        #[arg(long)]
        source_id: Option<String>,
    },
    /// Interactive chat; each line is sent as one message
    Chat {
        /// Upload this PDF first instead of resuming the last document
        #[arg(long)]
        file: Option<PathBuf>,
        /// Source id to chat about (defaults to the last uploaded document)
        #[arg(long)]
        source_id: Option<String>,
    },
    /// Print the source id remembered from the last upload
    Current,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pdfchat_cli=warn".parse()?)
                .add_directive("pdfchat_session=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = HttpRelayClient::new(cli.server);
    let store = FileStore::new(cli.state_file);
    let mut session = ChatSession::new(client, store);

    match cli.command {
        Some(Commands::Upload { path }) => {
            let source_id = upload(&mut session, path).await?;
            println!("Uploaded. Source id: {}", source_id);
            println!("Location: {}", session.location());
        }
        Some(Commands::Ask { message, source_id }) => {
            ask(&mut session, message, source_id).await?;
            print_reply(&session);
        }
        Some(Commands::Chat { file, source_id }) => {
            match file {
                Some(path) => {
                    upload(&mut session, path).await?;
                }
                None => resume(&mut session, source_id)?,
            }
            chat_loop(&mut session).await?;
        }
        Some(Commands::Current) => match session.store().get(SOURCE_ID_KEY)? {
            Some(source_id) => println!("{}", source_id),
            None => println!("No document uploaded yet."),
        },
        None => {
            println!("Use 'pdfchat --help' for commands");
        }
    }

    Ok(())
}

async fn upload(session: &mut Session, path: PathBuf) -> anyhow::Result<SourceId> {
    let file =
        PdfFile::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(session.upload(file).await?)
}

/// Send one message; a failed send is an error so the process exits non-zero.
async fn ask(
    session: &mut Session,
    message: String,
    source_id: Option<String>,
) -> anyhow::Result<()> {
    resume(session, source_id)?;
    session.set_input(message);
    session.send().await?;
    Ok(())
}

/// Open the chat view for an explicit id, or for the one kept in the state file.
fn resume(session: &mut Session, source_id: Option<String>) -> anyhow::Result<()> {
    let source_id = match source_id {
        Some(id) => Some(id),
        None => session.store().get(SOURCE_ID_KEY)?,
    };
    tracing::debug!(?source_id, "resolved source id");
    let view = View::Chat {
        source_id: source_id.and_then(|id| SourceId::new(id).ok()),
    };
    session.open(&view.to_location());
    Ok(())
}

async fn chat_loop(session: &mut Session) -> anyhow::Result<()> {
    match session.source_id() {
        Some(id) => println!("Chatting about {}. Type :quit to leave.", id),
        None => println!("No document selected. Upload one first."),
    }
    if let Some(preview) = session.preview() {
        println!(
            "Page {} of {} (:next / :prev to turn)",
            preview.page(),
            preview.page_count()
        );
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match line.trim() {
            ":quit" | ":q" => break,
            ":next" => print_page(session.next_page()),
            ":prev" => print_page(session.previous_page()),
            ":sidebar" => {
                let collapsed = session.toggle_sidebar();
                println!("Sidebar {}", if collapsed { "collapsed" } else { "expanded" });
            }
            _ => {
                session.set_input(line);
                match session.handle_key(KeyPress::enter()).await {
                    Ok(_) => print_reply(session),
                    Err(e) => alert(&e),
                }
            }
        }
    }
    Ok(())
}

fn print_reply(session: &Session) {
    if let Some(message) = session.transcript().last() {
        if message.role == Role::Assistant {
            println!("{}", message.content);
        }
    }
}

fn print_page(page: Option<u32>) {
    match page {
        Some(page) => println!("Page {}", page),
        None => println!("No preview loaded."),
    }
}

fn alert(e: &SessionError) {
    eprintln!("{}", e);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_session(dir: &tempfile::TempDir) -> Session {
        // Port 9 (discard) is not served on test machines; every request fails to connect.
        let client = HttpRelayClient::new("http://127.0.0.1:9");
        ChatSession::new(client, FileStore::new(dir.path().join("state.json")))
    }

    #[tokio::test]
    async fn ask_fails_when_send_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = offline_session(&dir);

        let err = ask(&mut session, "hello".into(), Some("src_1".into()))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("聊天失败："));
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn ask_without_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = offline_session(&dir);

        let err = ask(&mut session, "hello".into(), None).await.unwrap_err();
        assert_eq!(err.to_string(), "请先上传或选择PDF文件");
    }

    #[tokio::test]
    async fn ask_resumes_stored_source_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("state.json"));
        store.set(SOURCE_ID_KEY, "src_saved").unwrap();
        let mut session = offline_session(&dir);

        let _ = ask(&mut session, "hello".into(), None).await;
        assert_eq!(session.source_id().map(SourceId::as_str), Some("src_saved"));
    }
}
