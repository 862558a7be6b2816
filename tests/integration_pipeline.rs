// End-to-end workflow over an S-shaped well: trajectory construction,
// depth queries, torque-and-drag and the hookload envelope.

use wellbore_engine::{
    BuildMethod, HookloadSweep, PipeSectionParams, PipeString, SectionType, SurveyInfo,
    SurveyRecord, TensionMode, Trajectory, TorqueDragSolver, TorqueMode, WellBore,
    WellboreError, WellboreSectionParams,
};

fn s_shaped_records() -> Vec<SurveyRecord> {
    vec![
        SurveyRecord::new(250.0, 0.0, 0.0),
        SurveyRecord::new(500.0, 15.0, 120.0),
        SurveyRecord::new(1000.0, 45.0, 120.0),
        SurveyRecord::new(1500.0, 45.0, 120.0),
        SurveyRecord::new(2000.0, 20.0, 120.0),
        SurveyRecord::new(2500.0, 20.0, 120.0),
    ]
}

fn s_shaped_trajectory() -> Trajectory {
    Trajectory::build(&s_shaped_records(), SurveyInfo::default()).unwrap()
}

fn cased_and_open_wellbore() -> WellBore {
    let mut wellbore = WellBore::new("9 5/8 + open hole", 0.0, 2500.0, BuildMethod::TopDown).unwrap();
    wellbore
        .add_section(WellboreSectionParams {
            bottom: Some(1000.0),
            inner_diameter: 0.2168,
            friction_sliding: 0.2,
            ..Default::default()
        })
        .unwrap();
    wellbore
        .add_section(WellboreSectionParams {
            bottom: Some(2500.0),
            inner_diameter: 0.2159,
            friction_sliding: 0.3,
            ..Default::default()
        })
        .unwrap();
    wellbore
}

fn bha_and_drillpipe() -> PipeString {
    let mut string = PipeString::new("dp + bha", 0.0, 2500.0, BuildMethod::BottomUp).unwrap();
    string
        .add_section(PipeSectionParams {
            length: Some(150.0),
            od: 0.165,
            id: 0.0714,
            unit_weight: 1618.0,
            ..Default::default()
        })
        .unwrap();
    string
        .add_section(PipeSectionParams {
            od: 0.127,
            id: 0.1086,
            unit_weight: 305.0,
            tooljoint_od: Some(0.168),
            ..Default::default()
        })
        .unwrap();
    string
}

#[test]
fn test_trajectory_construction() {
    let trajectory = s_shaped_trajectory();

    assert_eq!(trajectory.len(), 7, "implicit surface point plus six records");
    assert_eq!(trajectory.max_md(), 2500.0);
    let mds: Vec<f64> = trajectory.points().iter().map(|p| p.md).collect();
    assert!(mds.windows(2).all(|w| w[0] < w[1]), "MD strictly increasing");

    let sections: Vec<SectionType> = trajectory.points().iter().map(|p| p.section_type).collect();
    assert_eq!(sections[1], SectionType::Vertical);
    assert_eq!(sections[2], SectionType::BuildUp);
    assert_eq!(sections[4], SectionType::Hold);
    assert_eq!(sections[5], SectionType::DropOff);

    // TVD can never exceed MD and must increase while inclination < 90.
    for p in trajectory.points() {
        assert!(p.tvd <= p.md + 1e-9);
    }
    assert!(trajectory.max_tvd() < 2500.0);
}

#[test]
fn test_interior_points_densify_the_path() {
    let info = SurveyInfo {
        interior_points: 4,
        ..SurveyInfo::default()
    };
    let dense = Trajectory::build(&s_shaped_records(), info).unwrap();
    let sparse = s_shaped_trajectory();

    assert_eq!(dense.len(), 1 + 6 * 5);
    // Densification must not move the survey stations.
    for p in sparse.points() {
        let q = dense.point_at_md(p.md).unwrap();
        assert!((q.tvd - p.tvd).abs() < 0.5, "TVD at md {}: {} vs {}", p.md, q.tvd, p.tvd);
        assert!((q.inc - p.inc).abs() < 1e-6);
    }
}

#[test]
fn test_depth_queries_round_trip() {
    let mut trajectory = s_shaped_trajectory();

    let at_md = trajectory.point_at_md(1250.0).unwrap();
    assert!(at_md.inc > 44.9 && at_md.inc < 45.1, "hold section keeps inclination");

    let tvd = at_md.tvd;
    let at_tvd = trajectory.point_at_tvd(tvd).unwrap();
    assert!((at_tvd.md - 1250.0).abs() < 0.5);

    let before = trajectory.len();
    let inserted = trajectory.insert_at_md(1250.0).unwrap();
    assert_eq!(trajectory.len(), before + 1);
    assert!((inserted.tvd - tvd).abs() < 1e-9);

    // Inserting at an existing node must not grow the trajectory.
    trajectory.insert_at_md(1250.0).unwrap();
    assert_eq!(trajectory.len(), before + 1);
}

#[test]
fn test_depth_queries_out_of_range() {
    let trajectory = s_shaped_trajectory();
    assert!(matches!(
        trajectory.point_at_md(-5.0),
        Err(WellboreError::Range(_))
    ));
    assert!(matches!(
        trajectory.point_at_md(9000.0),
        Err(WellboreError::Range(_))
    ));
    assert!(matches!(
        trajectory.point_at_tvd(9000.0),
        Err(WellboreError::Range(_))
    ));
}

#[test]
fn test_torque_drag_over_s_shaped_well() {
    let trajectory = s_shaped_trajectory();
    let wellbore = cased_and_open_wellbore();
    let string = bha_and_drillpipe();

    let solver = TorqueDragSolver::new(&trajectory, &wellbore, &string, 1.25).unwrap();
    let result = solver.solve().unwrap();

    assert_eq!(result.md[0], 0.0);
    assert_eq!(*result.md.last().unwrap(), 2500.0);
    for values in result.tension.values() {
        assert_eq!(values.len(), result.md.len());
    }

    let pickup = result.tension[&TensionMode::Pickup][0];
    let rotating = result.tension[&TensionMode::Rotating][0];
    let slackoff = result.tension[&TensionMode::Slackoff][0];
    assert!(pickup > rotating, "friction adds to pickup: {} vs {}", pickup, rotating);
    assert!(rotating > slackoff, "friction relieves slackoff: {} vs {}", rotating, slackoff);
    assert!(slackoff > 0.0, "string does not helically lock");

    // Rotating load is the frictionless buoyed weight along the path.
    let expected_rotating: f64 = result.weight_buoyed.iter().sum::<f64>()
        - result
            .weight_buoyed
            .iter()
            .zip(result.inc_average.iter())
            .map(|(w, inc)| w * (1.0 - inc.cos()))
            .sum::<f64>();
    assert!((rotating - expected_rotating).abs() / expected_rotating < 1e-9);

    let torque = &result.torque[&TorqueMode::Rotating];
    assert!(torque[0] > 0.0, "deviated well builds surface torque");
    assert!(
        torque.windows(2).all(|w| w[0] >= w[1] - 1e-9),
        "torque accumulates toward surface"
    );
}

#[test]
fn test_hookload_envelope_over_s_shaped_well() {
    let trajectory = s_shaped_trajectory();
    let wellbore = cased_and_open_wellbore();
    let string = bha_and_drillpipe();

    let mut sweep = HookloadSweep::new(&trajectory, &wellbore, &string, 1.25).unwrap();
    sweep.set_depth_step(250.0).unwrap();
    sweep.set_friction_range(0.15, 0.35, 0.1).unwrap();
    let envelope = sweep.run().unwrap();

    assert_eq!(*envelope.md.last().unwrap(), 2500.0);
    assert_eq!(envelope.series.len(), 3);

    for series in &envelope.series {
        let pickup = &series.tension[&TensionMode::Pickup];
        assert_eq!(pickup.len(), envelope.md.len());
        // Deeper run-in means more string weight to pick up.
        assert!(pickup.windows(2).all(|w| w[1] > w[0]));
    }

    // Wider friction spreads the envelope at total depth.
    let last = envelope.md.len() - 1;
    let low = &envelope.series[0];
    let high = &envelope.series[2];
    assert!(high.tension[&TensionMode::Pickup][last] > low.tension[&TensionMode::Pickup][last]);
    assert!(high.tension[&TensionMode::Slackoff][last] < low.tension[&TensionMode::Slackoff][last]);
}
