use futures_executor::block_on;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rlife_lib::{
    BBox, Config, Coord, Error, Frame, NeighborRange, Renderer, Rule, Status, Viewport, World,
};
use std::{collections::HashSet, error::Error as StdError, future, time::Duration};

fn world(cells: &[(i64, i64)]) -> World {
    World::from_cells(cells.iter().map(|&c| Coord::from(c)), Rule::default()).unwrap()
}

fn cells(world: &World) -> HashSet<(i64, i64)> {
    world.cells().map(|c| (c.row, c.col)).collect()
}

fn shifted(cells: &[(i64, i64)], dr: i64, dc: i64) -> HashSet<(i64, i64)> {
    cells.iter().map(|&(r, c)| (r + dr, c + dc)).collect()
}

/// A random world in a small rectangle, so that islands touch and merge.
fn random_world(rng: &mut StdRng, rule: Rule) -> World {
    let height = rng.gen_range(1..16);
    let width = rng.gen_range(1..16);
    let density = rng.gen_range(0.0..0.6);
    let (dr, dc) = (rng.gen_range(-20..20), rng.gen_range(-20..20));
    let cells = BBox::new(dr, dc, dr + height, dc + width)
        .cells()
        .filter(|_| rng.gen_bool(density))
        .collect::<Vec<_>>();
    World::from_cells(cells, rule).unwrap()
}

/// An upper bound at or above `lower`, or no bound at all.
fn random_upper(rng: &mut StdRng, lower: u32) -> Option<u32> {
    if rng.gen_bool(0.2) {
        None
    } else {
        Some(rng.gen_range(lower..=9))
    }
}

/// A random rule where a cell is never born without a living neighbor.
fn random_rule(rng: &mut StdRng) -> Rule {
    let s_lower = rng.gen_range(0..=4);
    let survival = NeighborRange::new(Some(s_lower), random_upper(rng, s_lower));
    let b_lower = rng.gen_range(1..=5);
    let birth = NeighborRange::new(Some(b_lower), random_upper(rng, b_lower));
    Rule::new(survival, birth)
}

#[test]
fn lonely_cell_dies() {
    let mut world = world(&[(7, -3)]);
    world.step();
    assert_eq!(world.population(), 0);
    assert_eq!(world.bbox(), BBox::new(7, -3, 7, -3));
    assert_eq!(world.render(), "");

    world.step();
    assert_eq!(world.population(), 0);
}

#[test]
fn block() {
    let block = [(0, 0), (0, 1), (1, 0), (1, 1)];
    let mut world = world(&block);
    for _ in 0..3 {
        world.step();
        assert_eq!(cells(&world), shifted(&block, 0, 0));
        assert_eq!(world.bbox(), BBox::new(0, 0, 2, 2));
    }
    world.step_full_scan();
    assert_eq!(cells(&world), shifted(&block, 0, 0));
}

#[test]
fn blinker() {
    let blinker = [(5, 4), (5, 5), (5, 6)];
    let mut world = world(&blinker);

    world.step();
    assert_eq!(cells(&world), [(4, 5), (5, 5), (6, 5)].iter().copied().collect());
    assert_eq!(world.bbox(), BBox::new(4, 5, 7, 6));
    assert_eq!(world.render(), "o\no\no\n");

    world.step();
    assert_eq!(cells(&world), shifted(&blinker, 0, 0));
    assert_eq!(world.bbox(), BBox::new(5, 4, 6, 7));
    assert_eq!(world.render(), "ooo\n");
}

#[test]
fn glider() {
    let glider = [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
    let mut world = world(&glider);
    for _ in 0..4 {
        world.step();
    }
    assert_eq!(cells(&world), shifted(&glider, 1, 1));
    assert_eq!(world.bbox(), BBox::new(1, 1, 4, 4));
}

#[test]
fn seed_extremes() -> Result<(), Box<dyn StdError>> {
    let mut rng = StdRng::seed_from_u64(0);

    let empty = World::seed(4, 6, 0.0, Rule::default(), &mut rng)?;
    assert_eq!(empty.population(), 0);
    assert_eq!(empty.bbox(), BBox::new(0, 0, 4, 6));

    let full = World::seed(4, 6, 1.0, Rule::default(), &mut rng)?;
    let expected: HashSet<_> = BBox::new(0, 0, 4, 6).cells().collect();
    assert_eq!(full.alive(), &expected);
    assert_eq!(full.bbox(), BBox::new(0, 0, 4, 6));

    let degenerate = World::seed(3, 3, 7.5, Rule::default(), &mut rng)?;
    assert_eq!(degenerate.population(), 9);
    Ok(())
}

#[test]
fn seed_rejects_bad_input() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        World::seed(0, 5, 0.5, Rule::default(), &mut rng),
        Err(Error::InvalidDimension {
            name: "height",
            value: 0,
        })
    );
    assert_eq!(
        World::seed(5, -2, 0.5, Rule::default(), &mut rng),
        Err(Error::InvalidDimension {
            name: "width",
            value: -2,
        })
    );
    let rule = Rule::new(NeighborRange::bounded(3, 1), NeighborRange::bounded(3, 4));
    assert_eq!(
        World::seed(5, 5, 0.5, rule, &mut rng),
        Err(Error::InvalidRange(String::from("3..1")))
    );
}

#[test]
fn from_cells_rejects_bad_rules() {
    let b0 = Rule::new(NeighborRange::bounded(2, 4), NeighborRange::bounded(0, 4));
    assert_eq!(World::from_cells(vec![Coord::new(0, 0)], b0), Err(Error::B0Error));
    let reversed = Rule::new(NeighborRange::bounded(5, 2), NeighborRange::bounded(3, 4));
    assert_eq!(
        World::from_cells(Vec::<Coord>::new(), reversed),
        Err(Error::InvalidRange(String::from("5..2")))
    );
}

#[test]
fn render_empty() -> Result<(), Box<dyn StdError>> {
    let world = World::seed(2, 3, 0.0, Rule::default(), &mut StdRng::seed_from_u64(1))?;
    assert_eq!(world.render(), "   \n   \n");
    assert_eq!(world.to_string(), "   \n   \n");
    Ok(())
}

#[test]
fn render_view() {
    let world = world(&[(-1, -1), (0, 0), (1, 2)]);
    assert_eq!(world.render(), "o   \n o  \n   o\n");
    assert_eq!(
        world.render_view(&Viewport::new(Some(2), Some(3))),
        "o  \n  o\n"
    );
    assert_eq!(world.render_view(&Viewport::new(Some(1), None)), " o  \n");
    assert_eq!(world.render_view(&Viewport::default()), world.render());
}

#[test]
fn island_search_matches_full_scan() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..200 {
        let rule = if round % 2 == 0 {
            Rule::default()
        } else {
            random_rule(&mut rng)
        };
        let mut island = random_world(&mut rng, rule);
        let mut scan = island.clone();
        for gen in 0..8 {
            island.step();
            scan.step_full_scan();
            assert_eq!(island, scan, "round {}, generation {}, rule {}", round, gen, rule);
        }
    }
}

#[test]
fn propagation_bound() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..50 {
        let rule = random_rule(&mut rng);
        let mut world = random_world(&mut rng, rule);
        for _ in 0..5 {
            let reach = world.bbox().expanded();
            world.step();
            assert!(world.cells().all(|&c| reach.contains(c)));
            assert!(world.cells().all(|&c| world.bbox().contains(c)));
        }
    }
}

#[test]
fn seeded_boxes_stay_valid() -> Result<(), Box<dyn StdError>> {
    let config = Config::new(30, 40).set_density(0.3).set_seed(Some(7));
    let mut scan = config.world()?;
    let mut island = scan.clone();
    for _ in 0..20 {
        scan.step_full_scan();
        island.step();
        assert_eq!(scan, island);
        assert!(island.cells().all(|&c| island.bbox().contains(c)));
    }
    Ok(())
}

#[test]
fn driver_stops_on_request() -> Result<(), Box<dyn StdError>> {
    let config = Config::new(10, 10).set_delay(20).set_seed(Some(3));
    let mut driver = config.driver()?;
    let stop = driver.stop_handle();
    assert_eq!(driver.status(), Status::Running);

    let mut generations = Vec::new();
    let mut renderer = |frame: Frame<'_>| {
        generations.push(frame.generation);
        if frame.generation == 2 {
            stop.stop();
        }
    };
    let mut sleeps = Vec::new();
    let mut timer = |duration: Duration| {
        sleeps.push(duration);
        future::ready(())
    };

    let rendered = block_on(driver.run(&mut renderer, &mut timer)).unwrap_or_else(|e| match e {});
    assert_eq!(rendered, 3);
    assert_eq!(generations, vec![0, 1, 2]);
    assert_eq!(sleeps, vec![Duration::from_millis(20); 2]);
    assert_eq!(driver.generation(), 2);
    assert_eq!(driver.status(), Status::Stopped);

    let mut calls = 0;
    let again = block_on(driver.run(
        &mut |_: Frame<'_>| calls += 1,
        &mut |_: Duration| future::ready(()),
    ));
    assert_eq!(again.unwrap_or_else(|e| match e {}), 0);
    assert_eq!(calls, 0);
    Ok(())
}

#[test]
fn driver_generation_limit() -> Result<(), Box<dyn StdError>> {
    let config = Config::new(6, 6)
        .set_delay(0)
        .set_seed(Some(4))
        .set_generations(Some(5))
        .set_view(Some(2), Some(4));
    let mut driver = config.driver()?;

    let mut reference = config.world()?;
    let mut texts = Vec::new();
    let mut renderer = |frame: Frame<'_>| {
        assert_eq!(frame.world, &reference);
        assert_eq!(frame.population(), reference.population());
        texts.push(frame.text.to_owned());
        reference.step();
    };
    let mut timer = |_: Duration| -> future::Ready<()> { panic!("a zero delay never sleeps") };

    let rendered = block_on(driver.run(&mut renderer, &mut timer)).unwrap_or_else(|e| match e {});
    assert_eq!(rendered, 5);
    assert_eq!(driver.generation(), 4);
    assert_eq!(driver.status(), Status::Stopped);
    assert!(texts.iter().all(|text| text.len() == 2 * 5));
    Ok(())
}

struct Flaky {
    frames: u32,
}

impl Renderer for Flaky {
    type Error = &'static str;

    fn render(&mut self, _: Frame<'_>) -> Result<(), Self::Error> {
        self.frames += 1;
        if self.frames > 1 {
            Err("display is gone")
        } else {
            Ok(())
        }
    }
}

#[test]
fn driver_renderer_error() -> Result<(), Box<dyn StdError>> {
    let mut driver = Config::new(5, 5).set_delay(0).driver()?;
    let mut renderer = Flaky { frames: 0 };
    let result = block_on(driver.run(&mut renderer, &mut |_: Duration| future::ready(())));
    assert_eq!(result, Err("display is gone"));
    assert_eq!(renderer.frames, 2);
    assert_eq!(driver.status(), Status::Stopped);
    Ok(())
}

#[test]
fn config_errors() {
    assert_eq!(
        Config::new(10, 10).set_density(-0.1).world(),
        Err(Error::DensityOutOfRange(-0.1))
    );
    assert_eq!(
        Config::new(-3, 10).driver().err(),
        Some(Error::InvalidDimension {
            name: "height",
            value: -3,
        })
    );
    assert_eq!(
        Config::from_pairs(vec![("rule", "B36/S23")]),
        Err(Error::NonContiguousRule(String::from("B36/S23")))
    );
    assert_eq!(
        Config::from_pairs(vec![("birth", "..3")]),
        Err(Error::B0Error)
    );
}

#[cfg(feature = "serde")]
#[test]
fn config_serde() -> Result<(), Box<dyn StdError>> {
    let config: Config = serde_json::from_str(
        r#"{ "height": 12, "viewWidth": 8, "survival": "1..6", "seed": 9 }"#,
    )?;
    assert_eq!(config.height, 12);
    assert_eq!(config.width, 100);
    assert_eq!(config.view_width, Some(8));
    assert_eq!(config.survival, NeighborRange::bounded(1, 6));
    assert_eq!(config.birth, NeighborRange::bounded(3, 4));
    assert_eq!(config.seed, Some(9));

    let json = serde_json::to_string(&config)?;
    assert_eq!(serde_json::from_str::<Config>(&json)?, config);
    Ok(())
}
