// ============================================================================
// TradeWave - Tableau de bord crypto simulé
// ============================================================================
// Programme TUI : login, dashboard, portefeuille, transactions, compte
// Toutes les données sont générées localement (aucun appel réseau)
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Worker thread + runtime tokio : la génération ne bloque jamais l'UI
// 4. Arc<Mutex<App>> : état partagé entre l'UI et le worker
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use tradewave::api::fetch_snapshot;
use tradewave::app::{App, InputTarget, Screen};
use tradewave::config::Config;
use tradewave::export::export_transactions;
use tradewave::models::Snapshot;
use tradewave::session::Session;
use tradewave::ui::{events::EventHandler, render};

// ============================================================================
// AppCommand / AppResult : protocole avec le worker thread
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - L'event loop envoie des commandes au worker thread
// - Le worker exécute la génération (async) et renvoie un résultat
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Générer un nouveau Snapshot pour la fenêtre donnée
    RegenerateSnapshot { window_days: u32 },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Snapshot prêt : il remplace l'ancien en entier
    SnapshotLoaded(Snapshot),

    /// Erreur lors de la génération
    LoadError { error: String },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// tail -f ./logs/tradewave.log.*
/// RUST_LOG=tradewave=trace tradewave
/// ```
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.log_dir.clone();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "tradewave.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Utile : UI et worker sont sur deux threads
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon debug pour tradewave et info ailleurs
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tradewave=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(?config, "TradeWave starting up");

    // CONCEPT : Gate d'authentification
    // - Session persistée => Dashboard directement
    // - Sinon => écran Login
    let session = Session::load(config.session_path());
    let authenticated = session.is_authenticated();
    let app = Arc::new(Mutex::new(App::new(session, config.window_days)));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, app.clone(), config.seed);

    // Déjà connecté : on génère tout de suite le premier Snapshot
    if authenticated {
        request_snapshot(&mut lock_app(&app), &command_tx);
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(
        &mut terminal,
        app.clone(),
        &events,
        &config,
        command_tx,
        result_rx,
    );

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Verrouille l'App en ignorant l'empoisonnement du Mutex
///
/// CONCEPT RUST : PoisonError
/// - Un thread qui panique en tenant le lock "empoisonne" le Mutex
/// - L'état reste lisible : into_inner() récupère quand même le guard
fn lock_app(app: &Arc<Mutex<App>>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Demande un nouveau Snapshot au worker pour la fenêtre courante
fn request_snapshot(app: &mut App, command_tx: &mpsc::Sender<AppCommand>) {
    let window_days = app.window_days;
    info!(window_days, "Requesting snapshot regeneration");

    if command_tx
        .send(AppCommand::RegenerateSnapshot { window_days })
        .is_err()
    {
        error!("Worker channel closed, cannot regenerate snapshot");
        app.set_status("✗ Générateur indisponible");
    }
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Thread + async runtime
// - std::thread::spawn() : crée un thread OS
// - tokio::runtime::Runtime : runtime async dans ce thread
// - block_on() bloque le worker, jamais l'UI
// ============================================================================

fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
    seed: Option<u64>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime");
                let _ = result_tx.send(AppResult::LoadError {
                    error: format!("runtime indisponible : {}", e),
                });
                return;
            }
        };

        // CONCEPT : Command processing loop
        // - recv() bloque jusqu'à la prochaine commande
        // - Err => l'UI a lâché le Sender, on s'arrête
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                AppCommand::RegenerateSnapshot { window_days } => {
                    lock_app(&app).start_loading(Some(format!(
                        "Génération de {} jours de données...",
                        window_days
                    )));

                    let result = runtime.block_on(fetch_snapshot(window_days, seed));

                    let message = match result {
                        Ok(snapshot) => AppResult::SnapshotLoaded(snapshot),
                        Err(e) => {
                            error!(window_days, error = ?e, "Failed to generate snapshot");
                            AppResult::LoadError {
                                error: e.to_string(),
                            }
                        }
                    };
                    let _ = result_tx.send(message);

                    lock_app(&app).stop_loading();
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. Appliquer les résultats du worker
//   1. Dessiner l'interface (render)
//   2. Traiter les événements (input)
//   3. Mettre à jour l'état (update)
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    config: &Config,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        if !lock_app(&app).is_running() {
            break;
        }

        // ========================================
        // 0. RÉSULTATS : try_recv ne bloque pas
        // ========================================
        loop {
            match result_rx.try_recv() {
                Ok(result) => apply_result(&mut lock_app(&app), result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    warn!("Worker thread disconnected");
                    break;
                }
            }
        }

        // ========================================
        // 1. RENDER
        // ========================================
        {
            let app_clone = app.clone();
            terminal.draw(|frame| {
                let app_lock = lock_app(&app_clone);
                render(frame, &app_lock);
            })?;
        }

        // ========================================
        // 2. INPUT
        // ========================================
        match events.next() {
            Ok(event) => {
                let mut app_lock = lock_app(&app);
                handle_event(&mut app_lock, event, &command_tx, &config.export_dir());
            }
            Err(e) => {
                debug!(error = ?e, "Failed to read terminal event");
            }
        }

        // ========================================
        // 3. UPDATE
        // ========================================
        lock_app(&app).tick();
    }

    Ok(())
}

/// Applique un résultat du worker à l'état de l'App
fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::SnapshotLoaded(snapshot) => {
            // Déconnexion pendant la génération : on jette le résultat
            if !app.is_authenticated() {
                debug!("Dropping snapshot received after logout");
                return;
            }
            info!(
                window_days = snapshot.window_days,
                transactions = snapshot.transactions.len(),
                "Snapshot applied"
            );
            app.set_snapshot(snapshot);
        }
        AppResult::LoadError { error } => {
            error!(error = %error, "Snapshot generation failed");
            app.set_status(format!("✗ Génération impossible : {}", error));
        }
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT RUST : Pattern matching avec guards
// - L'ordre des bras compte : le premier qui correspond gagne
// - Le mode saisie passe avant les raccourcis (une lettre tapée dans la
//   recherche ne doit pas déclencher de filtre)
// ============================================================================

fn handle_event(
    app: &mut App,
    event: tradewave::ui::events::Event,
    command_tx: &mpsc::Sender<AppCommand>,
    export_dir: &Path,
) {
    use tradewave::ui::events::{
        get_char_from_event, get_tab_index_from_event, is_asset_filter_event,
        is_backspace_event, is_clear_filters_event, is_custom_range_event, is_date_filter_event,
        is_down_event,
        is_enter_event, is_escape_event, is_export_event, is_kind_filter_event,
        is_logout_event, is_next_tab_event, is_next_window_event, is_previous_tab_event,
        is_previous_window_event, is_quit_event, is_refresh_event, is_search_event,
        is_text_char_event, is_up_event, Event,
    };

    if matches!(event, Event::Tick) {
        return;
    }

    // 'q' : quit two-step, sauf pendant une saisie
    if is_quit_event(&event) && !app.is_in_input_mode() {
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return;
    }

    // Toute autre touche annule la confirmation et efface le statut
    app.cancel_quit();
    app.clear_status();

    // ========================================
    // Écran Login : la saisie est toujours active
    // ========================================
    if app.is_on(Screen::Login) {
        match event {
            Event::Key(_) if is_escape_event(&event) => {
                info!("User quit from login screen");
                app.quit();
            }
            Event::Key(_) if is_enter_event(&event) => {
                let username = app.take_input().trim().to_string();
                if username.is_empty() {
                    app.set_status("Nom d'utilisateur requis");
                    return;
                }
                match app.login(&username) {
                    Ok(()) => request_snapshot(app, command_tx),
                    Err(e) => {
                        error!(error = ?e, "Login failed");
                        app.set_status(format!("✗ Connexion impossible : {}", e));
                    }
                }
            }
            Event::Key(_) if is_backspace_event(&event) => app.backspace(),
            Event::Key(_) if is_text_char_event(&event) => {
                if let Some(c) = get_char_from_event(&event) {
                    app.append_char(c);
                }
            }
            _ => {}
        }
        return;
    }

    // ========================================
    // Mode saisie : recherche ou plage de dates
    // ========================================
    if app.is_in_input_mode() {
        match event {
            Event::Key(_) if is_escape_event(&event) => {
                debug!("User cancelled search input");
                app.cancel_input();
            }
            Event::Key(_) if is_enter_event(&event) => match app.input_target {
                InputTarget::Search => {
                    app.submit_search();
                    info!(search = %app.search, "Search applied");
                }
                InputTarget::DateRange => match app.submit_date_range() {
                    Ok(()) => info!(range = %app.date_preset.label(), "Custom date range applied"),
                    Err(e) => {
                        warn!(error = %e, "Invalid date range");
                        app.set_status(format!("✗ Plage invalide : {}", e));
                    }
                },
            },
            Event::Key(_) if is_backspace_event(&event) => app.backspace(),
            Event::Key(_) if is_text_char_event(&event) => {
                if let Some(c) = get_char_from_event(&event) {
                    app.append_char(c);
                }
            }
            _ => {}
        }
        return;
    }

    let on_transactions = app.is_on(Screen::Transactions);

    match event {
        // Navigation entre onglets
        Event::Key(_) if is_next_tab_event(&event) => app.next_tab(),
        Event::Key(_) if is_previous_tab_event(&event) => app.previous_tab(),
        Event::Key(_) if get_tab_index_from_event(&event).is_some() => {
            if let Some(screen) = get_tab_index_from_event(&event)
                .and_then(|index| Screen::tabs().get(index).copied())
            {
                app.show(screen);
            }
        }

        // Fenêtre d'historique : change et régénère
        Event::Key(_) if is_next_window_event(&event) => {
            app.next_window();
            request_snapshot(app, command_tx);
        }
        Event::Key(_) if is_previous_window_event(&event) => {
            app.previous_window();
            request_snapshot(app, command_tx);
        }
        Event::Key(_) if is_refresh_event(&event) => request_snapshot(app, command_tx),

        Event::Key(_) if is_logout_event(&event) => {
            if let Err(e) = app.logout() {
                error!(error = ?e, "Logout failed");
                app.set_status(format!("✗ Déconnexion impossible : {}", e));
            }
        }

        // Vue Transactions : liste, filtres, export
        Event::Key(_) if on_transactions && is_up_event(&event) => app.navigate_up(),
        Event::Key(_) if on_transactions && is_down_event(&event) => app.navigate_down(),
        Event::Key(_) if on_transactions && is_search_event(&event) => app.start_search(),
        Event::Key(_) if on_transactions && is_kind_filter_event(&event) => {
            app.cycle_kind_filter()
        }
        Event::Key(_) if on_transactions && is_asset_filter_event(&event) => {
            app.cycle_asset_filter()
        }
        Event::Key(_) if on_transactions && is_date_filter_event(&event) => {
            app.cycle_date_preset()
        }
        Event::Key(_) if on_transactions && is_custom_range_event(&event) => {
            app.start_date_range_input()
        }
        Event::Key(_) if on_transactions && is_clear_filters_event(&event) => {
            app.reset_filters()
        }
        Event::Key(_) if on_transactions && is_export_event(&event) => {
            export_filtered(app, export_dir)
        }

        _ => {}
    }
}

/// Exporte la vue filtrée courante et affiche le résultat dans le footer
fn export_filtered(app: &mut App, export_dir: &Path) {
    // CONCEPT RUST : Portée d'emprunt
    // - `filtered` emprunte app en lecture
    // - Le bloc se termine avant set_status (emprunt mutable)
    let outcome = {
        let filtered = app.filtered_transactions();
        export_transactions(export_dir, &filtered).map(|path| (filtered.len(), path))
    };

    match outcome {
        Ok((count, path)) => {
            app.set_status(format!(
                "✓ {} transactions exportées vers {}",
                count,
                path.display()
            ));
        }
        Err(e) => {
            error!(error = ?e, "Export failed");
            app.set_status(format!("✗ Export impossible : {}", e));
        }
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
