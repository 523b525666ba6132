use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), tubeauth::provider::Error> {
    use tubeauth::util::cli::*;

    dotenv::dotenv().ok();

    let opts = Options::parse();
    run_cli_action(opts, &mut std::io::stdout()).await
}
