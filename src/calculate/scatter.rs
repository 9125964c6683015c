//! Scatter-plot bucketing.

use crate::models::{MetricKey, PlayerRecord, Position, ScatterPlot, ScatterPoint, ScatterSeries};

/// Project players onto two metrics, one series per position.
///
/// Series follow [`Position::ALL`] order and positions with no players are
/// omitted. Points keep input order within a series.
pub fn scatter<'a, I>(players: I, x_metric: MetricKey, y_metric: MetricKey) -> ScatterPlot
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let players: Vec<&PlayerRecord> = players.into_iter().collect();

    let series = Position::ALL
        .iter()
        .filter_map(|&position| {
            let points: Vec<ScatterPoint> = players
                .iter()
                .filter(|p| p.position == position)
                .map(|p| ScatterPoint {
                    player_id: p.id.clone(),
                    name: p.name.clone(),
                    team: p.team.clone(),
                    x: x_metric.value(p),
                    y: y_metric.value(p),
                })
                .collect();

            if points.is_empty() {
                None
            } else {
                Some(ScatterSeries {
                    position,
                    color: position.color(),
                    points,
                })
            }
        })
        .collect();

    ScatterPlot {
        x_metric,
        y_metric,
        x_label: x_metric.label(),
        y_label: y_metric.label(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::player;

    #[test]
    fn test_groups_by_position() {
        let mut fw = player("fw", Position::Forward);
        fw.xg = 20.0;
        fw.goals = 25.0;
        let mf = player("mf", Position::Midfielder);
        let gk = player("gk", Position::Goalkeeper);
        let fw2 = player("fw2", Position::Forward);

        let records = vec![fw, mf, gk, fw2];
        let plot = scatter(&records, MetricKey::Xg, MetricKey::Goals);

        let positions: Vec<_> = plot.series.iter().map(|s| s.position).collect();
        assert_eq!(
            positions,
            vec![Position::Forward, Position::Midfielder, Position::Goalkeeper]
        );
        assert_eq!(plot.point_count(), 4);

        let forwards = &plot.series[0];
        assert_eq!(forwards.color, Position::Forward.color());
        assert_eq!(forwards.points[0].x, 20.0);
        assert_eq!(forwards.points[0].y, 25.0);
        assert_eq!(forwards.points[1].player_id.as_str(), "fw2");
    }

    #[test]
    fn test_goalkeepers_get_their_own_colour() {
        let records = vec![
            player("df", Position::Defender),
            player("gk", Position::Goalkeeper),
        ];
        let plot = scatter(&records, MetricKey::ProgressivePasses, MetricKey::Sca);

        assert_ne!(plot.series[0].color, plot.series[1].color);
        assert_eq!(plot.x_label, "Prog Passes");
        assert_eq!(plot.y_label, "SCA");
    }

    #[test]
    fn test_empty_input() {
        let plot = scatter(std::iter::empty::<&PlayerRecord>(), MetricKey::Xg, MetricKey::Goals);
        assert!(plot.series.is_empty());
        assert_eq!(plot.point_count(), 0);
    }
}
