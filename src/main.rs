//! Headless demo running a small arena of agents against a scripted player

use nightmarch::prelude::*;

const DT: f32 = 1.0 / 60.0;
const TICKS: u32 = 900;

fn main() {
    env_logger::init();

    let mut config = WorldConfig::bordered(640, 480, 16, 7);
    config.obstacles.push(Obstacle::blocking("pillar", 288, 192, 64, 64));
    config.spawns.push(AgentSpawn {
        kind: AgentKind::Charger,
        position: Vec2::new(520.0, 360.0),
    });
    config.spawns.push(AgentSpawn {
        kind: AgentKind::Charger,
        position: Vec2::new(520.0, 120.0),
    });
    config.spawns.push(AgentSpawn {
        kind: AgentKind::Stalker,
        position: Vec2::new(560.0, 240.0),
    });

    let mut world = World::new(&config);
    log::info!("demo start: {} agents", world.agents().len());

    for tick in 0..TICKS {
        // The player paces along the left side and swings rightward once a second
        let y = 240.0 + 80.0 * (tick as f32 * DT * 0.8).sin();
        let mut player = PlayerView::idle(Vec2::new(120.0, y));
        if tick % 60 < 8 {
            player = player.attacking(Vec2::X);
        }

        world.tick(DT, &player);

        for event in world.events() {
            match event {
                WorldEvent::BashStarted { agent, direction } => {
                    log::info!("tick {tick}: agent {agent} bashes toward {direction:?}");
                }
                WorldEvent::AgentStruck { agent, damage, .. } => {
                    log::info!("tick {tick}: agent {agent} struck for {damage}");
                }
                WorldEvent::AgentSlain { agent } => {
                    log::info!("tick {tick}: agent {agent} slain");
                }
                _ => {}
            }
        }

        if world.alive_count() == 0 {
            log::info!("all agents down after {tick} ticks");
            break;
        }
    }

    for agent in world.agents() {
        println!(
            "agent {:?} finished at {:?} in state {:?} with {:.0} hp ({})",
            agent.kind(),
            agent.position(),
            agent.state(),
            agent.health(),
            if agent.is_alive() { "alive" } else { "down" }
        );
    }
}
