#[tokio::main]
async fn main() {
    hotel_backend::run().await
}
