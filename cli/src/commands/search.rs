//! Search command

use crate::output::{render_field_errors, OutputFormat};
use crate::SearchArgs;
use rickdex_core::{
    CharacterSource, Field, FieldValue, FinderConfig, FormController, FormState,
    HttpCharacterSource, Phase, SubmitOutcome, EMPTY_RESULTS_MESSAGE,
};

impl SearchArgs {
    fn values(self) -> [(Field, FieldValue); 6] {
        [
            (Field::Email, self.email.into()),
            (Field::Name, self.name.into()),
            (Field::Species, self.species.into()),
            (Field::Status, self.status.into()),
            (Field::MinEpisodes, self.min_episodes.into()),
            (Field::Accept, self.accept.into()),
        ]
    }
}

/// Types every field, leaves it, then submits, like a user on the screen.
pub async fn run<S: CharacterSource>(
    form: &FormController<S>,
    args: SearchArgs,
) -> Result<(SubmitOutcome, FormState), String> {
    for (field, value) in args.values() {
        form.set_field(field, value).map_err(|e| e.to_string())?;
        form.touch(field);
    }
    let outcome = form.submit().await;
    Ok((outcome, form.snapshot()))
}

pub async fn handle(args: SearchArgs, finder: &FinderConfig, format: OutputFormat) -> Result<(), String> {
    let source = HttpCharacterSource::from_config(finder).map_err(|e| e.to_string())?;
    let form = FormController::new(source);

    let (outcome, state) = run(&form, args).await?;
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            eprintln!("{}", render_field_errors(&errors));
            Err(format!("{} field(s) need attention", errors.len()))
        }
        SubmitOutcome::Busy => Err("a search is already running".into()),
        SubmitOutcome::Finished(Phase::Error) => Err(state.error_message),
        SubmitOutcome::Finished(_) if state.results.is_empty() => {
            println!("{}", EMPTY_RESULTS_MESSAGE);
            Ok(())
        }
        SubmitOutcome::Finished(_) => {
            println!("{}", format.render_cards(&state.results));
            Ok(())
        }
    }
}
