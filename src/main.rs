use blog_frontend::cli::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_frontend=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, title }) => {
            blog_frontend::cli::init::run(path, title).await?;
        }
        Some(Commands::Serve { host, port }) => {
            let config = blog_frontend::cli::load_config(&cli.config, cli.api_url)?;
            blog_frontend::cli::serve::run(config, host, port).await?;
        }
        Some(Commands::Blogs {
            search,
            limit,
            offset,
        }) => {
            let config = blog_frontend::cli::load_config(&cli.config, cli.api_url)?;
            blog_frontend::cli::blogs::list(&config, search, limit, offset).await?;
        }
        Some(Commands::Show { id }) => {
            let config = blog_frontend::cli::load_config(&cli.config, cli.api_url)?;
            blog_frontend::cli::blogs::show(&config, &id).await?;
        }
        Some(Commands::Login {
            username,
            password,
            token_file,
        }) => {
            let config = blog_frontend::cli::load_config(&cli.config, cli.api_url)?;
            blog_frontend::cli::login::run(&config, username, password, token_file).await?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
