use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// List every todo
    List,

    /// Create a new todo
    Create {
        /// Title, 1 to 30 characters
        title: String,
    },

    /// Show a single todo
    Show {
        id: String,
    },

    /// Mark a todo as finished
    Finish {
        id: String,
    },

    /// Delete a todo
    Delete {
        id: String,
    },

    /// Start the HTTP server (JSON API under /api/v1, pages under /todo)
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}
