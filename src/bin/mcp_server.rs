//! Pokedex Arena MCP Server
//!
//! A Model Context Protocol server (rmcp) exposing the battle engine and the
//! pack opener. Any number of battles can run at once; each one sits behind
//! its own mutex.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use pokedex_arena::display::{
    display_battle_status, display_move_list, display_opened_draw, display_pack_list,
    display_round, display_roster,
};
use pokedex_arena::{
    classify, AiKind, BattleRunner, EntropySource, PackCatalog, Roster, SharedBattle, Side,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};

const MAX_PACKS_PER_CALL: u32 = 10;

#[derive(Debug, Clone)]
pub struct PokedexArenaService {
    tool_router: ToolRouter<PokedexArenaService>,
    roster: Arc<Roster>,
    catalog: Arc<PackCatalog>,
    battles: Arc<Mutex<HashMap<String, SharedBattle>>>,
    next_battle: Arc<AtomicU64>,
    pack_rng: Arc<Mutex<EntropySource>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartBattleRequest {
    #[schemars(description = "Name of your combatant (see list_roster)")]
    pub player: String,
    #[schemars(description = "Name of the opponent's combatant (see list_roster)")]
    pub opponent: String,
    #[schemars(description = "Optional seed for a reproducible battle")]
    pub seed: Option<u64>,
    #[schemars(description = "Opponent behaviour: 'random' (default) or 'greedy'")]
    pub ai: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UseMoveRequest {
    #[schemars(description = "Battle id returned by start_battle")]
    pub battle_id: String,
    #[schemars(description = "Move number to use (1-4)")]
    pub move_number: u8,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BattleRequest {
    #[schemars(description = "Battle id returned by start_battle")]
    pub battle_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OpenPackRequest {
    #[schemars(description = "Pack id (see list_packs)")]
    pub pack_id: String,
    #[schemars(description = "How many draws to make (1-10, default 1)")]
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyRequest {
    #[schemars(description = "National dex number")]
    pub id: u32,
    #[schemars(description = "Sum of the six base stats")]
    pub base_stat_total: u32,
}

fn internal_error(message: String) -> McpError {
    McpError {
        code: ErrorCode(-32603),
        message: Cow::from(message),
        data: None,
    }
}

fn text_result(text: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

#[tool_router]
impl PokedexArenaService {
    pub fn new(roster: Roster, catalog: PackCatalog) -> Self {
        Self {
            tool_router: Self::tool_router(),
            roster: Arc::new(roster),
            catalog: Arc::new(catalog),
            battles: Arc::new(Mutex::new(HashMap::new())),
            next_battle: Arc::new(AtomicU64::new(1)),
            pack_rng: Arc::new(Mutex::new(EntropySource::from_os_rng())),
        }
    }

    fn battle(&self, battle_id: &str) -> Result<Option<SharedBattle>, McpError> {
        let battles = self
            .battles
            .lock()
            .map_err(|_| internal_error("battle registry lock poisoned".to_string()))?;
        Ok(battles.get(battle_id).cloned())
    }

    #[tool(description = "List the combatants that can be used in battles")]
    async fn list_roster(&self) -> Result<CallToolResult, McpError> {
        text_result(display_roster(&self.roster))
    }

    #[tool(description = "Start a new 1v1 battle and return its id")]
    async fn start_battle(
        &self,
        Parameters(request): Parameters<StartBattleRequest>,
    ) -> Result<CallToolResult, McpError> {
        let lookup = self
            .roster
            .find(&request.player)
            .and_then(|player| Ok((player.clone(), self.roster.find(&request.opponent)?.clone())));
        let (player, opponent) = match lookup {
            Ok(pair) => pair,
            Err(e) => return text_result(format!("Error: {}", e)),
        };
        let ai = match request.ai.as_deref().map(str::parse::<AiKind>).transpose() {
            Ok(ai) => ai.unwrap_or_default(),
            Err(e) => return text_result(format!("Error: {}", e)),
        };

        let runner = BattleRunner::new(player, opponent)
            .with_rng(EntropySource::from_optional_seed(request.seed))
            .with_behavior(ai.build());
        let intro = format!(
            "{}\nYour moves:\n{}",
            display_battle_status(runner.state()),
            display_move_list(runner.state().combatant(Side::Player))
        );

        let battle_id = format!(
            "battle-{}",
            self.next_battle.fetch_add(1, Ordering::Relaxed)
        );
        self.battles
            .lock()
            .map_err(|_| internal_error("battle registry lock poisoned".to_string()))?
            .insert(battle_id.clone(), runner.into_shared());
        tracing::info!(
            %battle_id,
            player = %request.player,
            opponent = %request.opponent,
            %ai,
            "battle started"
        );

        text_result(format!("Battle id: {}\n{}", battle_id, intro))
    }

    #[tool(description = "Use one of your moves; the opponent answers right away")]
    async fn use_move(
        &self,
        Parameters(request): Parameters<UseMoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(battle) = self.battle(&request.battle_id)? else {
            return text_result(format!(
                "No battle with id '{}'. Use 'start_battle' to begin.",
                request.battle_id
            ));
        };
        let mut runner = battle
            .lock()
            .map_err(|_| internal_error(format!("battle {} lock poisoned", request.battle_id)))?;

        let Some(move_index) = usize::from(request.move_number).checked_sub(1) else {
            return text_result("Error: move numbers start at 1".to_string());
        };
        let text = match runner.play_move(move_index) {
            Ok(round) => format!(
                "{}\n{}",
                display_round(&round),
                display_battle_status(runner.state())
            ),
            Err(e) => format!("Error: {}", e),
        };
        text_result(text)
    }

    #[tool(description = "Get the current state of a battle")]
    async fn get_battle_state(
        &self,
        Parameters(request): Parameters<BattleRequest>,
    ) -> Result<CallToolResult, McpError> {
        let Some(battle) = self.battle(&request.battle_id)? else {
            return text_result(format!("No battle with id '{}'.", request.battle_id));
        };
        let runner = battle
            .lock()
            .map_err(|_| internal_error(format!("battle {} lock poisoned", request.battle_id)))?;
        let state = runner.state();
        text_result(format!(
            "{}\nYour moves:\n{}",
            display_battle_status(state),
            display_move_list(state.combatant(Side::Player))
        ))
    }

    #[tool(description = "List the packs that can be opened and their drop rates")]
    async fn list_packs(&self) -> Result<CallToolResult, McpError> {
        text_result(display_pack_list(&self.catalog))
    }

    #[tool(description = "Open a pack and reveal the drawn Pokemon ids")]
    async fn open_pack(
        &self,
        Parameters(request): Parameters<OpenPackRequest>,
    ) -> Result<CallToolResult, McpError> {
        let count = request.count.unwrap_or(1).clamp(1, MAX_PACKS_PER_CALL) as usize;
        let mut rng = self
            .pack_rng
            .lock()
            .map_err(|_| internal_error("pack rng lock poisoned".to_string()))?;

        let text = match self.catalog.open_packs(&request.pack_id, count, &mut *rng) {
            Ok(draws) => draws
                .iter()
                .map(display_opened_draw)
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => format!("Error: {}", e),
        };
        text_result(text)
    }

    #[tool(description = "Classify a Pokemon's rarity from its dex number and base stat total")]
    async fn classify_rarity(
        &self,
        Parameters(request): Parameters<ClassifyRequest>,
    ) -> Result<CallToolResult, McpError> {
        let rarity = classify(request.id, request.base_stat_total);
        text_result(format!("#{:04}: {}", request.id, rarity))
    }
}

#[tool_handler]
impl ServerHandler for PokedexArenaService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pokedex_arena::logging::init();

    let roster_path = std::env::var_os("POKEDEX_ARENA_ROSTER").map(PathBuf::from);
    let packs_path = std::env::var_os("POKEDEX_ARENA_PACKS").map(PathBuf::from);
    let roster = Roster::load_or_builtin(roster_path.as_deref())?;
    let catalog = PackCatalog::load_or_builtin(packs_path.as_deref())?;

    tracing::info!(
        combatants = roster.combatants().len(),
        packs = catalog.packs.len(),
        "Pokedex Arena MCP server starting"
    );
    let service = PokedexArenaService::new(roster, catalog);
    let server = service.serve((stdin(), stdout())).await?;

    let quit_reason = server.waiting().await?;
    tracing::info!(?quit_reason, "Pokedex Arena MCP server exiting");
    Ok(())
}
