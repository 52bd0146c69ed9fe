use std::{env, error::Error, fs::File, io::BufReader};

use log::{error, info};
use slimmom_client::Client;
use slimmom_form::{
    config::Config, session::Session, validation::FormValues, SubmitError, SubmitOrchestrator,
};
use slimmom_store::FileStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let path = env::args().nth(1).unwrap_or_else(|| "form.json".to_owned());
    info!("Reading form values from {}", path);
    let file = File::open(&path)?;
    let values: FormValues = serde_json::from_reader(BufReader::new(file))?;

    let config = Config::load();
    let session = Session::from_env();
    let client: Box<dyn Client> = match config.request_timeout {
        Some(timeout) => Box::new(slimmom_client::create_with_timeout(
            config.api_url.clone(),
            timeout,
        )?),
        None => Box::new(slimmom_client::create(config.api_url.clone())),
    };
    let storage = FileStorage::open_from_env().await?;
    let orchestrator = SubmitOrchestrator::new(client, Box::new(storage), config.intake_failure);

    match orchestrator.submit(&values, &session).await {
        Ok(submission) => {
            submission
                .actions
                .iter()
                .for_each(|action| info!("{:?}", action));
            info!("Submission finished: {:?}", submission.outcome);
            Ok(())
        }
        Err(SubmitError::Intake { source, actions }) => {
            actions.iter().for_each(|action| info!("{:?}", action));
            error!("Daily intake unavailable, submit again to retry");
            Err(source.into())
        }
        Err(e) => Err(e.into()),
    }
}
