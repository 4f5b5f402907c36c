use pdfdeck::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("✗ {err}");
        std::process::exit(err.exit_code());
    }
}
