use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "order-viewer",
    version,
    about = "fetch an order by ID and render it as HTML tables",
    long_about = "order-viewer requests GET {api-url}/orders/{id} and renders the returned order as nested HTML tables inside a small host page.\n\nExamples:\n  order-viewer 42\n  order-viewer 42 -u http://orders.local:8080 -o ./order.html\n  order-viewer --interactive --fragment < ids.txt\n\nTip: Set ORDER_VIEWER_API_URL or use --config to avoid repeating the backend URL."
)]
pub struct CliArgs {
    #[arg(value_name = "ORDER_ID", help = "Order ID to look up.")]
    pub order_id: Option<String>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored terminal output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the host page to a file (rewritten on every state change)."
    )]
    pub output: Option<String>,

    #[arg(
        long = "fragment",
        help_heading = "Output",
        help = "Emit only the result markup instead of a full page."
    )]
    pub fragment: bool,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.order-viewer/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a default config file and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Input",
        help = "Read order IDs from stdin, one per line."
    )]
    pub interactive: bool,

    #[arg(
        short = 'u',
        long = "api-url",
        value_name = "URL",
        help_heading = "HTTP",
        help = "Backend base URL (default http://localhost:8080)."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds (none by default)."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        short = 'E',
        long = "envelope",
        value_name = "SHAPE",
        help_heading = "HTTP",
        help = "Response shape: auto, combined, or flat."
    )]
    pub envelope: Option<String>,

    #[arg(
        short = 'w',
        long = "workers",
        value_name = "N",
        help_heading = "Performance",
        help = "Number of runtime worker threads."
    )]
    pub workers: Option<usize>,
}
