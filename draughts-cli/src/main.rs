use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use draughts_cli::{load_config, Command, Reply, Session};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，避免与棋盘混在一起）
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("draughts=info".parse()?)
            .add_directive("draughts_cli=info".parse()?))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    info!(
        "加拿大跳棋启动: {}x{}, {}",
        config.width,
        config.height,
        config.capture_policy.display_name()
    );

    let mut session = Session::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "{}", session.render())?;
    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(stdout, "> ")?;
            stdout.flush()?;
            continue;
        }

        match Command::parse(&line) {
            Ok(command) => match session.execute(command) {
                Reply::Continue(text) => writeln!(stdout, "{}", text)?,
                Reply::Quit => break,
            },
            Err(e) => writeln!(stdout, "{} (type 'help')", e)?,
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }

    Ok(())
}
