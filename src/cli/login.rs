use crate::api::ApiClient;
use crate::components::{FormMessage, LoginForm};
use crate::storage::FileStore;
use crate::Config;
use anyhow::Result;
use std::path::PathBuf;

pub async fn run(
    config: &Config,
    username: String,
    password: Option<String>,
    token_file: Option<PathBuf>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };

    let path = match token_file {
        Some(p) => p,
        None => FileStore::default_path()?,
    };
    let mut store = FileStore::open(&path)?;
    let api = ApiClient::new(&config.api.base_url)?;

    let mut form = LoginForm::with_credentials(username, password);
    let result = form.submit(&api, &mut store).await;

    match form.message() {
        Some(FormMessage::Success(text)) => {
            println!("{} ({})", text, form.username());
            println!("Token file: {}", store.path().display());
        }
        Some(FormMessage::Error(text)) => anyhow::bail!("{}", text),
        None => {}
    }

    result.map_err(Into::into)
}
