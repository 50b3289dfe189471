#[actix_web::main]
async fn main() -> std::io::Result<()> {
    data_sweeper_lib::run().await
}
