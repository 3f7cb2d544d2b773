//! Application startup and command dispatch

use crate::app::cli::{Args, Command, Settings};
use crate::app::error::AppError;
use crate::app::factory::QueueFactory;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::version::version_line;
use crate::queue::{BlockSize, DeduplicatingQueue, OrderedQueue, QueueEnd, QueueResult};
use std::io::Write;

/// Run the binary: parse arguments, load configuration, execute one command
pub fn startup() {
    let args = Args::parse_from_env();

    let settings = match Settings::load(args.config_file.as_deref())
        .and_then(|settings| settings.with_overrides(&args))
    {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is configured from these settings, so report directly
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let log_file = settings
        .logging
        .file
        .as_ref()
        .map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        settings.logging.level.as_deref(),
        settings.logging.format.as_deref(),
        log_file.as_deref(),
        args.use_color(),
    ) {
        eprintln!("Error: Cannot start logging: {}", e);
        std::process::exit(1);
    }

    log::debug!("Final arguments: {:?}", args);
    log::debug!("Final settings: {:?}", settings);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&args, &settings, &mut out) {
        log_error_with_context(&e, &format!("Running {}", command_name(&args.command)));
        std::process::exit(1);
    }
}

/// Execute the parsed command, writing results to `out`
pub fn run(args: &Args, settings: &Settings, out: &mut dyn Write) -> Result<(), AppError> {
    dispatch(args, out, || QueueFactory::from_settings(settings))
}

/// Execute the parsed command against queues from `factory`
pub fn run_with_factory(
    args: &Args,
    factory: &QueueFactory,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    dispatch(args, out, || Ok(factory.clone()))
}

// The store is only opened once the command is known to need a queue
fn dispatch<F>(args: &Args, out: &mut dyn Write, open_factory: F) -> Result<(), AppError>
where
    F: FnOnce() -> Result<QueueFactory, AppError>,
{
    if !args.needs_queue() {
        writeln!(out, "{}", version_line())?;
        return Ok(());
    }
    if args.queue.is_empty() {
        return Err(AppError::MissingQueue);
    }
    let factory = open_factory()?;

    let queue = if args.dedup {
        CliQueue::Deduplicating(factory.deduplicating(args.queue.iter().cloned())?)
    } else {
        CliQueue::Ordered(factory.ordered(args.queue.iter().cloned())?)
    };
    log::info!("{}: {}", command_name(&args.command), queue.key());

    match &args.command {
        Command::Push {
            elements,
            front,
            block_size,
        } => {
            let end = if *front { QueueEnd::Head } else { QueueEnd::Tail };
            let block_size = match block_size {
                Some(size) => BlockSize::Limited(*size),
                None => factory.options().block_size,
            };
            match &queue {
                CliQueue::Ordered(q) if elements.len() == 1 => {
                    writeln!(out, "{}", q.push(&elements[0], end)?)?;
                }
                CliQueue::Ordered(q) => {
                    let length =
                        q.push_batch_with_block_size(elements.iter().cloned(), end, block_size)?;
                    writeln!(out, "{}", length)?;
                }
                CliQueue::Deduplicating(q) => {
                    let outcome =
                        q.push_batch_with_block_size(elements.iter().cloned(), end, block_size)?;
                    writeln!(out, "admitted {} length {}", outcome.admitted, outcome.length)?;
                }
            }
        }
        Command::Pop { tail } => {
            let end = if *tail { QueueEnd::Tail } else { QueueEnd::Head };
            match queue.pop(end)? {
                Some(element) => writeln!(out, "{}", element)?,
                None => log::info!("Queue {} is empty", queue.key()),
            }
        }
        Command::Len => writeln!(out, "{}", queue.length()?)?,
        Command::Range { from, to } => {
            for element in queue.range(*from, *to)? {
                writeln!(out, "{}", element)?;
            }
        }
        Command::First { count } => {
            for element in queue.first_n(*count)? {
                writeln!(out, "{}", element)?;
            }
        }
        Command::Delete => writeln!(out, "{}", queue.delete()?)?,
        Command::Version => {}
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Push { .. } => "push",
        Command::Pop { .. } => "pop",
        Command::Len => "len",
        Command::Range { .. } => "range",
        Command::First { .. } => "first",
        Command::Delete => "delete",
        Command::Version => "version",
    }
}

enum CliQueue {
    Ordered(OrderedQueue),
    Deduplicating(DeduplicatingQueue),
}

impl CliQueue {
    fn key(&self) -> &str {
        match self {
            CliQueue::Ordered(q) => q.key().as_str(),
            CliQueue::Deduplicating(q) => q.key().as_str(),
        }
    }

    fn pop(&self, end: QueueEnd) -> QueueResult<Option<String>> {
        match self {
            CliQueue::Ordered(q) => q.pop(end),
            CliQueue::Deduplicating(q) => q.pop(end),
        }
    }

    fn length(&self) -> QueueResult<u64> {
        match self {
            CliQueue::Ordered(q) => q.length(),
            CliQueue::Deduplicating(q) => q.length(),
        }
    }

    fn range(&self, from: i64, to: i64) -> QueueResult<Vec<String>> {
        match self {
            CliQueue::Ordered(q) => q.range(from, to),
            CliQueue::Deduplicating(q) => q.range(from, to),
        }
    }

    fn first_n(&self, n: usize) -> QueueResult<Vec<String>> {
        match self {
            CliQueue::Ordered(q) => q.first_n(n),
            CliQueue::Deduplicating(q) => q.first_n(n),
        }
    }

    fn delete(&self) -> QueueResult<bool> {
        match self {
            CliQueue::Ordered(q) => q.delete(),
            CliQueue::Deduplicating(q) => q.delete(),
        }
    }
}
