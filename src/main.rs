use eduquiz::app::{App, Tui};
use eduquiz::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let mut tui = Tui::new()?;
    let mut app = App::new()?;
    tui.init()?;
    let result = app.run(&mut tui).await;
    tui.restore()?;
    result
}
