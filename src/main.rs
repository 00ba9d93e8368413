use std::error::Error;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use ant_tuner::app::App;

/// Sleep between polls of the input queue and the tick loop
const IDLE_SLEEP: Duration = Duration::from_millis(1);

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting ant simulation tuner...");
    let mut app = App::new(io::stdout())?;
    app.render_panels();
    log::info!("Type 'help' for commands");

    let lines = spawn_input_reader();

    loop {
        loop {
            match lines.try_recv() {
                Ok(line) => {
                    if !app.handle_line(&line) {
                        return Ok(());
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::info!("Input closed, exiting...");
                    return Ok(());
                }
            }
        }

        app.process_pending()?;
        app.update(Instant::now());
        thread::sleep(IDLE_SLEEP);
    }
}

/// Forward stdin lines to the interaction thread
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });
    rx
}
