/// A service that keeps running beside the main program until it is cancelled.
#[async_trait::async_trait]
pub trait BackgroundService: Send + Sync {
    /// Runs until the service decides to stop.
    async fn run(&self);
}
