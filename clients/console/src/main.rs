use clap::Parser;
use people_console::{
    api::HttpPeopleApi,
    app::App,
    view::{parse_command, render, Command, HELP},
};
use std::io;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Set at build time with `PEOPLE_API_URL=https://... cargo build`
const DEFAULT_API_URL: &str = match option_env!("PEOPLE_API_URL") {
    Some(url) => url,
    None => "https://csd-attendance.onrender.com",
};

/// 📇 People console, a small form / list client for the people REST server
#[derive(Parser, Debug)]
struct Cli {
    /// Base URL of the people API
    #[clap(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let api = HttpPeopleApi::new(&args.api_url);

    log::info!("Using people API at {}", api.base_url());

    let mut app = App::new(api);

    app.load().await;

    println!("{}", render(app.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Name(name) => app.set_name(&name),
            Command::Age(age) => app.set_age(&age),
            Command::Add => {
                if let Err(alert) = app.submit().await {
                    println!("⚠️  {}", alert);
                }
            }
            Command::Edit(row) => {
                let id = app.state().people.get(row - 1).map(|person| person.id.clone());

                match id {
                    Some(id) => {
                        app.start_edit(&id);
                    }
                    None => println!("No person at row {}", row),
                }
            }
            Command::Save => app.save_edit().await,
            Command::Cancel => app.cancel_edit(),
            Command::Delete(row) => {
                let id = app.state().people.get(row - 1).map(|person| person.id.clone());

                match id {
                    Some(id) => app.delete(&id).await,
                    None => println!("No person at row {}", row),
                }
            }
            Command::Reload => app.load().await,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        println!("{}", render(app.state()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_defaults_to_the_build_time_value() {
        let args = Cli::try_parse_from(["people"]).expect("should parse");

        assert_eq!(args.api_url, DEFAULT_API_URL);

        if option_env!("PEOPLE_API_URL").is_none() {
            assert_eq!(args.api_url, "https://csd-attendance.onrender.com");
        }
    }

    #[test]
    fn api_url_can_be_overridden_at_runtime() {
        let args = Cli::try_parse_from(["people", "--api-url", "http://localhost:4000"])
            .expect("should parse");

        assert_eq!(args.api_url, "http://localhost:4000");
    }
}
