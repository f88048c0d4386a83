use auxide_probe::config::RunParams;
use auxide_probe::harness::run_probe;
use auxide_probe::report::{render_table, write_table};
use auxide_probe::units::{DcStep, GatedSine};
use proptest::prelude::*;

#[test]
fn default_run_prints_128_rows() {
    let output = run_probe(GatedSine::default(), RunParams::default()).unwrap();
    let table = render_table(&output.outputs);
    assert_eq!(table.lines().count(), 128);
    for (frame, row) in table.lines().enumerate() {
        let cells: Vec<&str> = row.split('\t').collect();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], frame.to_string());
    }
    assert!(table.ends_with('\n'));
    assert!(!table.ends_with("\n\n"));
}

#[test]
fn gated_sine_second_phase_overwrites_head() {
    let output = run_probe(GatedSine::default(), RunParams::default()).unwrap();
    let table = render_table(&output.outputs);
    let rows: Vec<Vec<f64>> = table
        .lines()
        .map(|row| row.split('\t').map(|c| c.parse().unwrap()).collect())
        .collect();
    // Row 0 holds stream frame 32: gate still on, hold released.
    assert_ne!(rows[0][1], 0.0);
    assert_eq!(rows[0][2], 0.0);
    // Phase 2 covers 96 frames; the tail was never written.
    for (frame, row) in rows.iter().enumerate().skip(96) {
        assert_eq!(row, &vec![frame as f64, 0.0, 0.0]);
    }
}

proptest! {
    #[test]
    fn one_row_per_frame(frames in 1usize..400, sample_rate in 1u32..192_000) {
        let params = RunParams::from_args(
            Some(frames.to_string().as_str()),
            Some(sample_rate.to_string().as_str()),
        );
        let output = run_probe(GatedSine::default(), params).unwrap();
        prop_assert_eq!(render_table(&output.outputs).lines().count(), frames);
    }

    #[test]
    fn rendering_is_idempotent(frames in 1usize..200) {
        let params = RunParams::from_args(Some(frames.to_string().as_str()), None);
        let output = run_probe(DcStep::default(), params).unwrap();
        let first = render_table(&output.outputs);
        let second = render_table(&output.outputs);
        prop_assert_eq!(&first, &second);

        let mut streamed = Vec::new();
        write_table(&mut streamed, &output.outputs).unwrap();
        prop_assert_eq!(String::from_utf8(streamed).unwrap(), first);
    }
}
