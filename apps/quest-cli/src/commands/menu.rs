// menu.rs — Interactive menu: create, list, save, load, record, quit.
//
// The loop reads from any BufRead and writes to any Write so it can be
// driven by a script in tests. End of input behaves like choosing Quit.
// Bad input (unknown kind, non-numeric points, wrong goal number) is
// reported and the loop carries on.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use quest_goal::{ChecklistTerms, GoalError, GoalKind, QuestConfig, QuestEvent};

use super::Session;

pub fn execute(config: &QuestConfig) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut session, config, stdin.lock(), stdout.lock())
}

pub(crate) fn run<R: BufRead, W: Write>(
    session: &mut Session,
    config: &QuestConfig,
    mut input: R,
    mut out: W,
) -> anyhow::Result<()> {
    writeln!(out, "Welcome to the Eternal Quest Program!")?;
    writeln!(out, "=====================================")?;

    loop {
        writeln!(out, "\nYou have {} points.", session.store.score())?;
        writeln!(out, "\nMenu Options:")?;
        writeln!(out, "  1. Create New Goal")?;
        writeln!(out, "  2. List Goals")?;
        writeln!(out, "  3. Save Goals")?;
        writeln!(out, "  4. Load Goals")?;
        writeln!(out, "  5. Record Event")?;
        writeln!(out, "  6. Quit")?;

        let Some(choice) = prompt(&mut input, &mut out, "Select a choice from the menu: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => create_goal(session, &mut input, &mut out)?,
            "2" => list_goals(session, &mut out)?,
            "3" => save_goals(session, config, &mut input, &mut out)?,
            "4" => load_goals(session, config, &mut input, &mut out)?,
            "5" => record_event(session, &mut input, &mut out)?,
            "6" => {
                writeln!(out, "\nGoodbye! Keep working on your eternal quest!")?;
                break;
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }

    out.flush()?;
    Ok(())
}

/// Print `question`, then read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", question)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a number; `Ok(None)` covers both end of input and a reply
/// that doesn't parse (the latter is reported).
fn prompt_number<T: std::str::FromStr, R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<Option<T>> {
    let Some(reply) = prompt(input, out, question)? else {
        return Ok(None);
    };
    match reply.parse() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
            writeln!(out, "Please enter a valid number.")?;
            Ok(None)
        }
    }
}

fn create_goal<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\nThe types of Goals are:")?;
    writeln!(out, "  1. Simple Goal")?;
    writeln!(out, "  2. Eternal Goal")?;
    writeln!(out, "  3. Checklist Goal")?;
    let Some(kind) = prompt(input, out, "Which type of goal would you like to create? ")? else {
        return Ok(());
    };
    let kind: GoalKind = match kind.parse() {
        Ok(kind) => kind,
        Err(_) => return writeln!(out, "Invalid goal type."),
    };

    let Some(name) = prompt(input, out, "What is the name of your goal? ")? else {
        return Ok(());
    };
    let Some(description) = prompt(input, out, "What is a short description of it? ")? else {
        return Ok(());
    };
    let Some(points) = prompt_number::<i64, _, _>(
        input,
        out,
        "What is the amount of points associated with this goal? ",
    )?
    else {
        return Ok(());
    };

    let terms = if kind == GoalKind::Checklist {
        let Some(target) = prompt_number::<u32, _, _>(
            input,
            out,
            "How many times does this goal need to be accomplished for a bonus? ",
        )?
        else {
            return Ok(());
        };
        let Some(bonus) = prompt_number::<u32, _, _>(
            input,
            out,
            "What is the bonus for accomplishing it that many times? ",
        )?
        else {
            return Ok(());
        };
        Some(ChecklistTerms { target, bonus })
    } else {
        None
    };

    match session
        .store
        .create(kind, &name, &description, points, terms)
    {
        Ok(index) => {
            session
                .events
                .record(&QuestEvent::goal_created(index, &name, kind));
            writeln!(out, "Goal #{} created successfully!", index)
        }
        Err(e) => writeln!(out, "Could not create goal: {}", e),
    }
}

fn list_goals<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    match session.store.list() {
        Ok(lines) => {
            writeln!(out, "\nYour Goals:")?;
            for (i, line) in lines.iter().enumerate() {
                writeln!(out, "{}. {}", i + 1, line)?;
            }
            Ok(())
        }
        Err(_) => writeln!(out, "\nNo goals available. Create some goals first!"),
    }
}

/// Read a filename; an empty reply means the configured goal file.
fn prompt_path<R: BufRead, W: Write>(
    config: &QuestConfig,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<PathBuf>> {
    let question = format!(
        "What is the filename for the goal file? [{}] ",
        config.goals_file.display()
    );
    Ok(prompt(input, out, &question)?.map(|reply| {
        if reply.is_empty() {
            config.goals_file.clone()
        } else {
            PathBuf::from(reply)
        }
    }))
}

fn save_goals<R: BufRead, W: Write>(
    session: &Session,
    config: &QuestConfig,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(path) = prompt_path(config, input, out)? else {
        return Ok(());
    };
    match session.save(&path) {
        Ok(()) => writeln!(out, "Goals saved successfully!"),
        Err(e) => writeln!(out, "Error saving goals: {}", e),
    }
}

fn load_goals<R: BufRead, W: Write>(
    session: &mut Session,
    config: &QuestConfig,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(path) = prompt_path(config, input, out)? else {
        return Ok(());
    };
    if !path.exists() {
        return writeln!(out, "File not found.");
    }
    match session.load(&path) {
        Ok(()) => writeln!(out, "Goals loaded successfully!"),
        Err(e) => writeln!(out, "Error loading goals: {}", e),
    }
}

fn record_event<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let names = match session.store.names() {
        Ok(names) => names,
        Err(_) => return writeln!(out, "\nNo goals available. Create some goals first!"),
    };
    writeln!(out, "\nThe goals are:")?;
    for (i, name) in names.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, name)?;
    }

    let Some(index) = prompt_number::<usize, _, _>(input, out, "Which goal did you accomplish? ")?
    else {
        return Ok(());
    };
    let outcome = match session.store.record_event(index) {
        Ok(outcome) => outcome,
        Err(GoalError::InvalidIndex { .. }) => return writeln!(out, "Invalid goal number."),
        Err(e) => return writeln!(out, "Could not record event: {}", e),
    };

    let score = session.store.score();
    session.events.record(&QuestEvent::event_recorded(
        index,
        &names[index - 1],
        outcome,
        score,
    ));

    writeln!(
        out,
        "\nCongratulations! You have earned {} points!",
        outcome.points_awarded
    )?;
    if outcome.completed {
        writeln!(out, "Goal Completed! Amazing work!")?;
    }
    writeln!(out, "You now have {} points.", score)
}
