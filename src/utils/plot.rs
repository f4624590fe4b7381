use std::path::Path;

use plotters::prelude::*;

use crate::pipelines::text_classification::History;

/// Plot Error
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// There is nothing to plot
    #[error("the training history is empty")]
    EmptyHistory,

    /// The drawing backend failed
    #[error("unable to draw {0}")]
    Drawing(String),
}

/// A training series drawn as points and a validation series drawn as a line
struct Curves<'a> {
    title: &'a str,
    y_desc: &'a str,
    training_label: &'a str,
    validation_label: &'a str,
    training: Vec<f64>,
    validation: Vec<f64>,
}

/// Render the training and validation loss per epoch as an SVG file
pub fn plot_loss(history: &History, path: &Path) -> Result<(), PlotError> {
    draw(
        path,
        Curves {
            title: "Training and validation loss",
            y_desc: "Loss",
            training_label: "Training loss",
            validation_label: "Validation loss",
            training: history.loss(),
            validation: history.val_loss(),
        },
    )
}

/// Render the training and validation accuracy per epoch as an SVG file
pub fn plot_accuracy(history: &History, path: &Path) -> Result<(), PlotError> {
    draw(
        path,
        Curves {
            title: "Training and validation accuracy",
            y_desc: "Accuracy",
            training_label: "Training acc",
            validation_label: "Validation acc",
            training: history.accuracy(),
            validation: history.val_accuracy(),
        },
    )
}

fn draw(path: &Path, curves: Curves) -> Result<(), PlotError> {
    let epochs = curves.training.len();
    if epochs == 0 {
        return Err(PlotError::EmptyHistory);
    }

    let drawing =
        |e: &dyn std::fmt::Display| PlotError::Drawing(format!("{}: {}", path.display(), e));

    let finite = curves
        .training
        .iter()
        .chain(&curves.validation)
        .copied()
        .filter(|value| value.is_finite());
    let (y_min, y_max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    });
    let (y_min, y_max) = if y_min.is_finite() && y_max > y_min {
        let margin = (y_max - y_min) * 0.05;
        (y_min - margin, y_max + margin)
    } else {
        (0.0, 1.0)
    };

    let root = SVGBackend::new(path, (640, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| drawing(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(curves.title, ("sans-serif", 22))
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0.5f64..(epochs as f64 + 0.5), y_min..y_max)
        .map_err(|e| drawing(&e))?;

    chart
        .configure_mesh()
        .x_desc("Epochs")
        .y_desc(curves.y_desc)
        .draw()
        .map_err(|e| drawing(&e))?;

    let training = points(&curves.training);
    let validation = points(&curves.validation);

    chart
        .draw_series(training.into_iter().map(|point| Circle::new(point, 4, BLUE.filled())))
        .map_err(|e| drawing(&e))?
        .label(curves.training_label)
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    chart
        .draw_series(LineSeries::new(validation, &BLUE))
        .map_err(|e| drawing(&e))?
        .label(curves.validation_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| drawing(&e))?;

    root.present().map_err(|e| drawing(&e))?;

    Ok(())
}

/// Pair each value with its 1-based epoch number, skipping values that cannot be drawn
fn points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(i, value)| ((i + 1) as f64, *value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::text_classification::{EpochMetrics, Evaluation};

    fn history() -> History {
        let mut history = History::default();

        for (epoch, loss) in [(1, 0.69), (2, 0.6), (3, 0.52)] {
            history.push(EpochMetrics::new(
                epoch,
                Evaluation { loss, accuracy: 1.0 - loss },
                Evaluation { loss: loss + 0.02, accuracy: 0.98 - loss },
            ));
        }

        history
    }

    #[test]
    fn writes_svg_plots() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let loss = dir.path().join("loss.svg");
        let accuracy = dir.path().join("accuracy.svg");

        plot_loss(&history(), &loss)?;
        plot_accuracy(&history(), &accuracy)?;

        let svg = std::fs::read_to_string(&loss)?;
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Training and validation loss"));
        assert!(accuracy.exists());

        Ok(())
    }

    #[test]
    fn refuses_an_empty_history() {
        let dir = tempfile::tempdir().unwrap();

        let result = plot_loss(&History::default(), &dir.path().join("loss.svg"));

        assert!(matches!(result, Err(PlotError::EmptyHistory)));
    }

    #[test]
    fn skips_non_finite_points() {
        assert_eq!(points(&[0.5, f64::NAN, 0.25]), vec![(1.0, 0.5), (3.0, 0.25)]);
    }
}
