mod cli;
mod info_cmd;
mod page_cmd;
mod page_list;
mod serve_cmd;
mod shared;
mod text_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    shared::init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Info {
            ref file,
            ref password,
            ref format,
        } => info_cmd::run(file, password, format),
        cli::Commands::Page {
            ref file,
            number,
            ref password,
            ref format,
        } => page_cmd::run(file, number, password, format),
        cli::Commands::Text {
            ref file,
            ref pages,
            ref password,
            ref format,
        } => text_cmd::run(file, pages.as_deref(), password, format),
        cli::Commands::Serve { workers } => serve_cmd::run(workers),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
