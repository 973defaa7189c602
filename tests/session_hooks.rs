use coffer::config::{Config, CurrencyConfig};
use coffer::host::{Inventory, MemoryCatalog, MonospaceMeasure, ScriptHost};
use coffer::ledger::{Denomination, DrawOp, Rect};
use coffer::session::{GameSession, SaveContents};

#[derive(Default)]
struct Party {
    items: Vec<(u32, i64)>,
}

impl Inventory for Party {
    fn gain_item(&mut self, item_id: u32, amount: i64, _include_equip: bool) {
        self.items.push((item_id, amount));
    }
}

#[derive(Default)]
struct Interpreter {
    variables: Vec<(u32, i64)>,
    reserved: Vec<u32>,
}

impl ScriptHost for Interpreter {
    fn set_variable(&mut self, variable_id: u32, value: i64) {
        self.variables.push((variable_id, value));
    }

    fn reserve_common_event(&mut self, event_id: u32) {
        self.reserved.push(event_id);
    }
}

/// Dollar standard with catalog items 1..=5.
fn dollar_config() -> Config {
    Config {
        currency: CurrencyConfig {
            denominations: vec![
                Denomination::new(1, 100).labelled("dollar", "$"),
                Denomination::new(2, 25).labelled("quarter", "q"),
                Denomination::new(3, 10).labelled("dime", "d"),
                Denomination::new(4, 5).labelled("nickel", "n"),
                Denomination::new(5, 1).labelled("penny", "p"),
            ],
            default_unit: 5,
            ..CurrencyConfig::default()
        },
        ..Config::default()
    }
}

#[test]
fn currency_pickups_never_reach_inventory() {
    let mut session = GameSession::with_seed(&dollar_config(), 1).unwrap();
    let mut party = Party::default();

    assert!(session.on_item_gained(&mut party, 2, 3, false).unwrap());
    assert!(session.on_item_gained(&mut party, 1, 1, false).unwrap());
    assert!(!session.on_item_gained(&mut party, 40, 1, false).unwrap());

    assert_eq!(session.purse().gold(), 175);
    assert_eq!(party.items, vec![(40, 1)]);
    assert_eq!(session.gold_breakdown(false).counts(), &[1, 3, 0, 0, 0]);
}

#[test]
fn losing_currency_items_clamps_at_zero() {
    let mut session = GameSession::with_seed(&dollar_config(), 1).unwrap();
    let mut party = Party::default();
    session.on_item_gained(&mut party, 3, 2, false).unwrap();
    session.on_item_gained(&mut party, 1, -1, false).unwrap();
    assert_eq!(session.purse().gold(), 0);
}

#[test]
fn tagged_shop_prices_convert() {
    let session = GameSession::with_seed(&dollar_config(), 1).unwrap();
    let mut catalog = MemoryCatalog::new();
    catalog.insert(30, "<Currency: 1>", 0);
    catalog.insert(31, "<Currency: 3>", 0);
    catalog.insert(32, "", 0);
    catalog.insert(33, "<Currency: 99>", 0);

    assert_eq!(session.on_shop_price(&catalog, 30, 2).unwrap(), 200);
    assert_eq!(session.on_shop_price(&catalog, 31, 4).unwrap(), 40);
    assert_eq!(session.on_shop_price(&catalog, 32, 4).unwrap(), 4);
    assert_eq!(session.on_shop_price(&catalog, 33, 4).unwrap(), 4);

    let total = session.shop_total(40, 3).unwrap();
    assert_eq!(total.counts(), &[1, 0, 2, 0, 0]);
}

#[test]
fn price_layout_skips_empty_denominations() {
    let session = GameSession::with_seed(&dollar_config(), 1).unwrap();
    let mut catalog = MemoryCatalog::new();
    catalog.insert(1, "", 313);
    catalog.insert(3, "", 316);
    let measure = MonospaceMeasure::default();

    let ops = session.layout_price(120, Rect::new(0, 0, 400, 36), &catalog, &measure);
    let texts: Vec<&str> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    // dime drawn first (rightmost), then dollar
    assert_eq!(texts, vec!["2", "1"]);
    let icons = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Icon { .. }))
        .count();
    assert_eq!(icons, 2);
}

#[test]
fn gold_layout_draws_all_slots_and_caps() {
    let mut session = GameSession::with_seed(&dollar_config(), 1).unwrap();
    session.purse_mut().gain_gold(104);
    let catalog = MemoryCatalog::new();
    let measure = MonospaceMeasure::default();

    let texts = |ops: Vec<DrawOp>| -> Vec<String> {
        ops.into_iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    };

    let gold = texts(session.layout_gold(Rect::new(0, 0, 600, 36), false, &catalog, &measure));
    assert_eq!(gold, vec!["4", "0", "0", "0", "1"]);

    // 100,000,000 dollars is above the 99,999,999 display cap
    let huge = texts(session.layout_price(
        10_000_000_000,
        Rect::new(0, 0, 600, 36),
        &catalog,
        &measure,
    ));
    assert_eq!(huge, vec!["A lot!"]);
}

#[test]
fn equipment_trigger_reserves_event() {
    let mut config = Config::default();
    config.equip_trigger.common_event_id = 7;
    config.equip_trigger.variable_id = 12;
    let session = GameSession::with_seed(&config, 1).unwrap();
    let mut interpreter = Interpreter::default();

    let slots = [1, 2, 3, 4, 5];
    assert!(session.on_change_equip(2, 3, &slots, &mut interpreter));
    assert!(!session.on_change_equip(2, 0, &slots, &mut interpreter));
    assert_eq!(interpreter.variables, vec![(12, 2)]);
    assert_eq!(interpreter.reserved, vec![7]);
}

#[test]
fn rejected_commands_leave_settings_untouched() {
    let mut session = GameSession::with_seed(&Config::default(), 1).unwrap();
    let before = session.message_settings().clone();
    assert!(session.on_plugin_command("AnimFace Delay soon later").is_err());
    assert!(!session.on_plugin_command("Weather rain").unwrap());
    assert_eq!(session.message_settings(), &before);
}

#[test]
fn save_and_restore_round_trip() {
    let config = dollar_config();
    let mut session = GameSession::with_seed(&config, 1).unwrap();
    session.purse_mut().gain_gold(1234);
    session.on_plugin_command("AnimFace Delay 10 20").unwrap();
    let bytes = session.save().unwrap();

    let contents = SaveContents::from_bytes(&bytes).unwrap();
    assert_eq!(contents.currencies, *session.ledger());
    assert_eq!(contents.message.max_pause_ticks, 20);

    let mut restored = GameSession::with_seed(&config, 2).unwrap();
    restored.restore(&bytes).unwrap();
    assert_eq!(restored.purse().gold(), 1234);
    assert_eq!(restored.message_settings().min_pause_ticks, 10);
    assert_eq!(restored.ledger(), session.ledger());
}

#[test]
fn corrupt_save_is_an_error() {
    let mut session = GameSession::with_seed(&Config::default(), 1).unwrap();
    assert!(session.restore(&[0xff, 0x01]).is_err());
}
