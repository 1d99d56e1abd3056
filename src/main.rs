use rocket::{launch, Build, Rocket};

#[launch]
fn rocket() -> Rocket<Build> {
    wardcast::launch()
}
