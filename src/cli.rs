// src/cli.rs
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::FormatOptions;
use crate::config::consts::DEFAULT_FILL_LENGTH;
use crate::login::{CaptchaSolver, Credentials};
use crate::scrape::Scraper;

#[derive(Parser, Debug)]
#[command(
    name = "gushi",
    version,
    disable_version_flag = true,
    about = "Search poems and authors on gushiwen"
)]
pub struct Args {
    /// Print version.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    _version: Option<bool>,

    /// Search an author; prints its id.
    #[arg(short, long, value_name = "NAME")]
    pub author: Option<String>,

    /// Search poems by title; prints one id per line.
    #[arg(short = 'p', long = "poem", visible_alias = "poetry", value_name = "NAME")]
    pub poem: Option<String>,

    /// Fetch a poem by id and print it laid out.
    #[arg(short, long, value_name = "ID")]
    pub show: Option<String>,

    /// Sentence delimiters for --show, e.g. "，。".
    #[arg(long, value_name = "CHARS")]
    pub delimiters: Option<String>,

    /// Centering correction for --show.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_FILL_LENGTH)]
    pub fill: usize,

    /// Log in before searching (phone number or e-mail).
    #[arg(long, requires = "password")]
    pub user: Option<String>,

    #[arg(long, requires = "user")]
    pub password: Option<String>,

    #[arg(long)]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose);

    let scraper = Scraper::new().wrap_err("building HTTP client")?;

    if let (Some(user), Some(password)) = (&args.user, &args.password) {
        let creds = Credentials::new(user.as_str(), password.as_str())?;
        let solver = PromptSolver { path: std::env::temp_dir().join("gushi_captcha.gif") };
        scraper.login(&creds, &solver).wrap_err("login")?;
    }

    if let Some(name) = &args.author {
        match scraper.search_author(name)? {
            Some(id) => println!("{id}"),
            None => println!("No information about this author."),
        }
    }

    if let Some(name) = &args.poem {
        for id in scraper.search_poetry(name)? {
            println!("{id}");
        }
    }

    if let Some(id) = &args.show {
        let poem = scraper.poetry(id, true).wrap_err_with(|| format!("poetry {id}"))?;
        let mut opts = FormatOptions::default().with_fill_length(args.fill);
        if let Some(d) = &args.delimiters {
            opts = opts.with_delimiters(d);
        }
        println!("{}", poem.prettify(&opts));
    }

    Ok(())
}

/// Saves the captcha next to the temp files and asks on the terminal.
struct PromptSolver {
    path: PathBuf,
}

impl CaptchaSolver for PromptSolver {
    fn solve(&self, image: &[u8]) -> crate::Result<String> {
        std::fs::write(&self.path, image)?;
        eprint!("Captcha saved to {}. Type it: ", self.path.display());
        io::stderr().flush()?;

        let mut line = s!();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}
