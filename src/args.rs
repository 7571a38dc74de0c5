use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hodl-racing")]
#[command(about = "Backend server for the HODL Racing DAO rewards platform")]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// RPC URL override
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Build the leaderboard once, print it as JSON and exit
    #[arg(long)]
    pub print_leaderboard: bool,
}
