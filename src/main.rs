use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match folder_sync::cli::run().await {
        Ok(()) => {}
        Err(err) => {
            println!("{err}");
            process::exit(1);
        }
    }
}
