use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pax completions bash > ~/.bash_completion.d/pax\n\n\
                  Generate zsh completions:\n    pax completions zsh > ~/.zfunc/_pax\n\n\
                  Generate fish completions:\n    pax completions fish > ~/.config/fish/completions/pax.fish\n\n\
                  Generate PowerShell completions:\n    pax completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
