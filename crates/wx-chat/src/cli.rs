//! CLI (Command Line Interface) mode
//!
//! Provides the interactive chat REPL that mediates between the user,
//! the model, and the weather Tool Endpoint. Also supports a
//! non-interactive execute mode for one-shot prompts.

use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, Reedline, ReedlineEvent, ReedlineMenu, Signal, Suggestion,
};
use tracing::info;

use wx_core::{ClaudeClient, Config, Conversation, Message, ToolManager};
use wx_tools::register_default_tools;

/// Exit keyword that terminates the session (exact match)
const EXIT_KEYWORD: &str = "quit";

/// Available commands for autocomplete display
const COMMANDS: &[(&str, &str)] = &[
    ("/help", "Show this help"),
    ("/exit", "Exit the program"),
    ("/quit", "Exit the program"),
    ("/clear", "Clear conversation history"),
    ("/history", "Show conversation history"),
];

/// Command completer for reedline
#[derive(Clone)]
pub struct CommandCompleter {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
        }
    }
}

impl Default for CommandCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        if !line.starts_with('/') {
            return Vec::new();
        }

        self.commands
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(line))
            .map(|(cmd, desc)| Suggestion {
                value: cmd.to_string(),
                description: Some(desc.to_string()),
                extra: None,
                span: reedline::Span::new(0, pos),
                append_whitespace: true,
                style: None,
            })
            .collect()
    }
}

/// Custom prompt with colored styling
struct ColoredPrompt {
    style: Style,
}

impl ColoredPrompt {
    fn new() -> Self {
        Self {
            style: Color::Cyan.bold(),
        }
    }
}

impl Prompt for ColoredPrompt {
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Owned(self.style.paint("> ").to_string())
    }

    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_indicator(
        &self,
        _prompt_mode: reedline::PromptEditMode,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: reedline::PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        std::borrow::Cow::Borrowed("")
    }
}

/// CLI configuration
pub struct CliConfig {
    pub system_prompt: String,
    pub max_iterations: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are a helpful assistant that can check weather information \
                for cities. Use the available tools when users ask about weather."
                .to_string(),
            max_iterations: 10,
        }
    }
}

/// Run the interactive chat mode
pub async fn run_chat(client: ClaudeClient, config: &Config) -> anyhow::Result<()> {
    let cli_config = CliConfig::default();
    run_chat_with_config(client, config, cli_config).await
}

/// Run the interactive chat mode with custom configuration
pub async fn run_chat_with_config(
    client: ClaudeClient,
    config: &Config,
    cli_config: CliConfig,
) -> anyhow::Result<()> {
    // Initialize tool manager
    let mut tool_manager = ToolManager::new();
    register_default_tools(&mut tool_manager, config);

    info!("Starting chat mode with {} tools", tool_manager.len());

    // Welcome message
    print_welcome(&tool_manager);

    // Setup keybindings
    let mut keybindings = default_keybindings();

    // Trigger completion on '/' key
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Char('/'),
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );

    // Setup menu - with_only_buffer_difference(false) makes menu show even without buffer changes
    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(40))
            .with_only_buffer_difference(false),
    );

    // Setup hinter
    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    // Create line editor
    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter::new()))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = ColoredPrompt::new();

    // Conversation history (in-memory, discarded on exit)
    let mut conversation = Conversation::new();

    loop {
        let signal = line_editor.read_line(&prompt);

        match signal {
            Ok(Signal::Success(line)) => {
                let input = line.trim();

                // Handle empty input
                if input.is_empty() {
                    continue;
                }

                // Exit keyword ends the session
                if is_exit_keyword(input) {
                    println!("\n👋 Goodbye!\n");
                    break;
                }

                // Handle special commands
                if handle_command(input, &mut conversation) {
                    continue;
                }

                // Add user message to history
                conversation.push(Message::user(input));

                // Run the turn
                match client
                    .run_turn(
                        &mut conversation.messages,
                        &cli_config.system_prompt,
                        &tool_manager,
                        cli_config.max_iterations,
                    )
                    .await
                {
                    Ok(response) => {
                        // Print response
                        println!("\n🤖 {}\n", response);

                        // Add assistant response to history
                        conversation.push(Message::assistant(&response));
                    }
                    Err(e) => {
                        eprintln!("\n❌ Error: {}\n", e);
                    }
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("\n👋 Goodbye!\n");
                break;
            }
            Err(err) => {
                eprintln!("\n❌ Error: {}\n", err);
                break;
            }
        }
    }

    Ok(())
}

/// Check whether the input is the session exit keyword
fn is_exit_keyword(input: &str) -> bool {
    input == EXIT_KEYWORD
}

/// Default keybindings for reedline
fn default_keybindings() -> Keybindings {
    let mut keybindings = Keybindings::new();
    // Tab key triggers completion
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Submit);
    // Esc key clears/closes menus
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('c'),
        ReedlineEvent::CtrlC,
    );
    keybindings.add_binding(
        KeyModifiers::CONTROL,
        KeyCode::Char('d'),
        ReedlineEvent::CtrlD,
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    keybindings
}

/// Handle special commands (/exit, /clear, /help, /history)
fn handle_command(input: &str, conversation: &mut Conversation) -> bool {
    let lower = input.to_lowercase();

    match lower.as_str() {
        "/exit" | "/quit" | "/q" => {
            println!("\n👋 Goodbye!\n");
            std::process::exit(0);
        }
        "/clear" => {
            conversation.clear();
            println!("\n✅ Conversation history cleared.\n");
            true
        }
        "/help" | "/?" => {
            print_commands();
            true
        }
        "/history" => {
            print_history(conversation);
            true
        }
        _ if lower.starts_with('/') => {
            eprintln!(
                "\n❓ Unknown command: {}. See /help for the command list.\n",
                input
            );
            true
        }
        _ => false,
    }
}

/// Print welcome message
fn print_welcome(tool_manager: &ToolManager) {
    println!();
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║          🌤️ wx-chat - interactive weather chat             ║");
    println!("╠════════════════════════════════════════════════════════════╣");
    println!("║  Type a message and press Enter to chat                    ║");
    println!("║  Commands: /help, /exit, /clear, /history                  ║");
    println!("║  Type 'quit' to leave the session                          ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();
    println!("📚 Available tools: {:?}", tool_manager.tool_names());
    println!();
}

/// Print command list
fn print_commands() {
    println!();
    println!("📖 Available commands:");
    for (cmd, desc) in COMMANDS {
        println!("  {} - {}", cmd, desc);
    }
    println!();
    println!("💡 Hint: typing / shows command suggestions");
    println!("💡 Type 'quit' (or press Ctrl-D) to end the session");
    println!();
}

/// Print conversation history
fn print_history(conversation: &Conversation) {
    println!();
    println!("📜 Conversation history ({} messages):", conversation.message_count());
    println!("{}", "─".repeat(50));

    for (i, msg) in conversation.messages.iter().enumerate() {
        let role = match msg.role.as_str() {
            "user" => "👤 You",
            "assistant" => "🤖 AI",
            _ => &msg.role,
        };
        let text = msg.text_content();
        let preview = if text.len() > 100 {
            format!("{}...", &text[..100])
        } else {
            text.clone()
        };
        println!("{}. {}: {}", i + 1, role, preview.replace('\n', " "));
    }

    println!("{}", "─".repeat(50));
    println!();
}

// ============================================================================
// 非対話モード (Non-interactive mode)
// ============================================================================

/// 非対話モード: プロンプトを直接実行して終了
///
/// # 使用例
/// ```bash
/// wx-chat --execute "what is the weather in Aruba"
/// ```
pub async fn run_execute(
    client: ClaudeClient,
    config: &Config,
    prompt: &str,
) -> anyhow::Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Error: prompt is empty");
        std::process::exit(1);
    }

    // ツールマネージャーを初期化
    let mut tool_manager = ToolManager::new();
    register_default_tools(&mut tool_manager, config);

    info!("Starting execute mode with {} tools", tool_manager.len());

    let cli_config = CliConfig::default();
    let mut messages: Vec<Message> = vec![Message::user(prompt)];

    match client
        .run_turn(
            &mut messages,
            &cli_config.system_prompt,
            &tool_manager,
            cli_config.max_iterations,
        )
        .await
    {
        Ok(response) => {
            println!("{}", response);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
