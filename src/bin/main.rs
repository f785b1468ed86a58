use std::io::{self, BufRead, Write};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use feedr::config::{self, ClientConfig};
use feedr::pages::{account, edit_post, feed, my_posts, profile, single_post, FormFields, PageContext, PageOutcome};
use feedr::templates;
use feedr::views::FollowButton;
use feedr::{Dialog, FileStore};

#[derive(Parser)]
#[command(name = "feedr", version, about = "Read and write posts on the social feed from a terminal")]
struct Cli {
    /// Print rendered HTML instead of plain text
    #[arg(long, global = true)]
    html: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Posts from everyone
    Feed,
    /// Show one post
    Post { id: String },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Replace a post; fields left out keep their current value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    Delete { id: String },
    MyPosts,
    /// Show a profile, your own by default
    Profile { name: Option<String> },
    Follow { name: String },
    Unfollow { name: String },
}

struct TerminalDialog {
    assume_yes: bool,
}

impl Dialog for TerminalDialog {
    fn alert(&self, message: &str) {
        println!("{}", message);
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

type Ctx = PageContext<FileStore, TerminalDialog>;

fn form(fields: &[(&str, Option<&str>)]) -> FormFields {
    fields
        .iter()
        .filter_map(|(id, value)| value.map(|v| (id.to_string(), v.to_string())))
        .collect()
}

/// Prints the outcome. Returns false for failures so the exit code can reflect them.
fn report<V>(outcome: PageOutcome<V>, render: impl FnOnce(&V) -> anyhow::Result<String>) -> anyhow::Result<bool> {
    match outcome {
        PageOutcome::Rendered(view) => {
            let out = render(&view)?;
            if !out.is_empty() {
                println!("{}", out);
            }
            Ok(true)
        }
        PageOutcome::Redirect(to) => {
            println!("-> {}", to);
            Ok(true)
        }
        PageOutcome::Failed(message) => {
            eprintln!("{}", message);
            Ok(false)
        }
    }
}

async fn run(ctx: &mut Ctx, command: Command, html: bool) -> anyhow::Result<bool> {
    match command {
        Command::Login { email, password } => {
            let fields = form(&[("email", Some(email.as_str())), ("password", Some(password.as_str()))]);
            report(account::submit_login(ctx, &fields).await, |_| Ok(String::new()))
        }
        Command::Register { name, email, password } => {
            let fields = form(&[("name", Some(name.as_str())), ("email", Some(email.as_str())), ("password", Some(password.as_str()))]);
            report(account::submit_register(ctx, &fields).await, |_| Ok(String::new()))
        }
        Command::Logout => report(account::logout(ctx), |_| Ok(String::new())),
        Command::Feed => report(feed::load_feed(ctx).await, |view| {
            if html { templates::feed_html(view) } else { Ok(view.to_string()) }
        }),
        Command::Post { id } => report(single_post::load_post(ctx, &config::post_page(&id)).await, |card| {
            if html { templates::post_html(card) } else { Ok(card.to_string()) }
        }),
        Command::Create { title, body, image_url } => {
            let fields = form(&[
                ("title", Some(title.as_str())),
                ("body", Some(body.as_str())),
                ("imageUrl", image_url.as_deref()),
            ]);
            report(feed::submit_post(ctx, &fields).await, |view| {
                if html { templates::feed_html(view) } else { Ok(view.to_string()) }
            })
        }
        Command::Edit { id, title, body, image_url } => {
            let current = match edit_post::load_edit_form(ctx, &config::edit_page(&id)).await {
                PageOutcome::Rendered(current) => current,
                other => return report(other, |_| Ok(String::new())),
            };
            if html {
                println!("{}", templates::edit_form_html(&current)?);
            }
            let fields = form(&[
                ("title", Some(title.as_deref().unwrap_or(&current.title))),
                ("body", Some(body.as_deref().unwrap_or(&current.body))),
                ("image", Some(image_url.as_deref().unwrap_or(&current.image_url))),
            ]);
            report(edit_post::submit_edit(ctx, &current.post_id, &fields).await, |_| Ok(String::new()))
        }
        Command::Delete { id } => report(single_post::delete_post(ctx, &id).await, |deletion| {
            Ok(format!("{:?}", deletion))
        }),
        Command::MyPosts => report(my_posts::load_my_posts(ctx).await, |view| {
            if html { templates::feed_html(view) } else { Ok(view.to_string()) }
        }),
        Command::Profile { name } => {
            let location = name.map(|n| config::profile_page(&n)).unwrap_or_else(|| "/profile.html".to_string());
            report(profile::load_profile(ctx, &location).await, |view| {
                if html { templates::profile_html(view) } else { Ok(view.to_string()) }
            })
        }
        Command::Follow { name } => change_follow(ctx, &name, FollowButton::Follow).await,
        Command::Unfollow { name } => change_follow(ctx, &name, FollowButton::Unfollow).await,
    }
}

/// Only presses the button when it currently offers the requested action.
async fn change_follow(ctx: &mut Ctx, name: &str, wanted: FollowButton) -> anyhow::Result<bool> {
    let mut view = match profile::load_profile(ctx, &config::profile_page(name)).await {
        PageOutcome::Rendered(view) => view,
        other => return report(other, |_| Ok(String::new())),
    };

    if view.follow_button != wanted {
        let message = match view.follow_button {
            FollowButton::Hidden => "You cannot follow your own profile.".to_string(),
            FollowButton::Follow => format!("You are not following {}.", view.name),
            FollowButton::Unfollow => format!("You already follow {}.", view.name),
        };
        eprintln!("{}", message);
        return Ok(false);
    }

    let outcome = profile::toggle_follow(ctx, &mut view).await;
    report(outcome, |_| Ok(view.to_string()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = FileStore::open(config::storage_dir())?;
    let mut ctx = PageContext::new(ClientConfig::from_env(), store, TerminalDialog { assume_yes: cli.yes })?;

    if !run(&mut ctx, cli.command, cli.html).await? {
        std::process::exit(1);
    }
    Ok(())
}
