use supportbase_console::config::CONFIG;
use supportbase_console::App;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 SupportBase console ({}) → {}", CONFIG.environment, CONFIG.api_base);

    yew::Renderer::<App>::new().render();
}
