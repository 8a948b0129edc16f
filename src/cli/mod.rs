use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Subscribe a device to the "sample" topic
    Subscribe {
        /// Registration token of the device to subscribe
        #[arg(long, env = "DEVICE_TOKEN")]
        token: String,
    },

    /// Run the hourly notification job once
    Send,

    /// Serve the cron job endpoint (GET /_job)
    Serve {
        /// Port to listen on; falls back to $PORT, then 8080
        #[arg(long)]
        port: Option<u16>,
    },
}
