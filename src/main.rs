#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::{web, App, HttpServer};
    use leptos::get_configuration;
    use leptos::logging::log;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use reelmood::api::{self, AppState};
    use reelmood::app;
    use reelmood::completion::GeminiClient;
    use reelmood::config::AppConfig;
    use reelmood::db::Database;
    use std::io;
    use std::sync::Arc;

    fn startup_error(err: impl std::fmt::Display) -> io::Error {
        io::Error::new(io::ErrorKind::Other, err.to_string())
    }

    let config = AppConfig::from_env().map_err(startup_error)?;

    // Initialize the database
    let db = Database::new(&config.database_path).map_err(startup_error)?;
    db.create_schema().await.map_err(startup_error)?; // Ensure the schema is created
    log!("Schema created successfully!");

    let completion = GeminiClient::new(config.gemini.clone()).map_err(startup_error)?;
    log!("Using completion model: {}", completion.model());

    // Created once, shared by every worker
    let state = web::Data::new(AppState {
        completion: Arc::new(completion),
        store: Arc::new(db),
    });

    // Load configuration
    let conf = get_configuration(None).await.map_err(startup_error)?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(app::App);
    log!("listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(state.clone())
            // Register API routes BEFORE the Leptos routes
            .configure(api::configure)
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), app::App)
            // Pass Leptos options to the app
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use reelmood::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
