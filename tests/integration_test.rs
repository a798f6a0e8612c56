//! 集成測試

use printcost::session::Session;
use printcost::{cli, logging, report};
use printcost_calc::{DistributionCalculator, PrintCostCalculator};
use printcost_core::*;
use rust_decimal::Decimal;
use std::io::Cursor;

fn printer(
    nickname: &str,
    power: Decimal,
    print_time: Decimal,
    nozzle: Decimal,
    bed_capacity: u32,
) -> Printer {
    Printer::new(nickname.to_string(), power, print_time, nozzle, bed_capacity)
}

#[test]
fn test_print_farm_cost_calculation() {
    // 測試完整流程：註冊表 → 分配 → 成本
    // 場景：100 件、每件 10g、耗材 20/kg、無折扣、電價 0.15
    logging::init_test();

    // 1. 建立註冊表
    let mut registry = PrinterRegistry::new();
    registry
        .add(printer("MK4", Decimal::new(12, 2), Decimal::from(2), Decimal::new(4, 1), 10))
        .unwrap();
    registry
        .add(printer("X1C", Decimal::new(35, 2), Decimal::ONE, Decimal::new(4, 1), 5))
        .unwrap();

    // 2. 工作參數
    let request = CostRequest::new(100)
        .with_material(Decimal::from(10), Decimal::from(20))
        .with_energy_cost(Decimal::new(15, 2))
        .with_commission(Decimal::new(25, 2));

    // 3. 執行計算
    let result = PrintCostCalculator::new(&registry)
        .calculate(&request)
        .unwrap();

    // 4. 驗證分配
    // X1C 先拿 5 件(1h)；之後兩台皆 2h 平手 → MK4 拿 10 件、X1C 再拿 5 件，依此循環
    // 每輪 20 件、完工 +2h；100 件 = 5 輪
    assert_eq!(result.distribution.units_for("MK4"), Some(50));
    assert_eq!(result.distribution.units_for("X1C"), Some(50));
    assert_eq!(result.distribution.total_units(), 100);
    assert_eq!(result.distribution.makespan(), Decimal::from(10));

    // 5. 驗證成本
    // 耗材: (100 × 10 / 1000) × 20 = 20.00
    assert_eq!(report::two_dp(result.material_cost), "20.00");
    // 電費: (50×2×0.12 + 50×1×0.35) × 0.15 = (12 + 17.5) × 0.15 = 4.425
    assert_eq!(result.energy_cost, Decimal::new(4425, 3));
    assert_eq!(report::two_dp(result.energy_cost), "4.43");
    assert_eq!(report::two_dp(result.total_cost), "24.43");
    // 佣金: 0.25 × 100 = 25
    assert_eq!(report::two_dp(result.total_with_commission), "49.43");
}

#[test]
fn test_discount_applied_to_material_only() {
    let registry = PrinterRegistry::from_printers(vec![printer(
        "Solo",
        Decimal::ONE,
        Decimal::ONE,
        Decimal::new(4, 1),
        1,
    )])
    .unwrap();
    let request = CostRequest::new(4)
        .with_material(Decimal::from(250), Decimal::from(40))
        .with_discount(Decimal::new(25, 2))
        .with_energy_cost(Decimal::ONE);

    let result = PrintCostCalculator::new(&registry)
        .calculate(&request)
        .unwrap();

    // 耗材: 1kg × 40 × 0.75 = 30；電費: 4 × 1h × 1kW × 1 = 4
    assert_eq!(result.material_cost, Decimal::from(30));
    assert_eq!(result.energy_cost, Decimal::from(4));
    assert_eq!(result.total_with_commission, Decimal::from(34));
}

#[test]
fn test_import_then_distribute() {
    // 匯入含錯誤行的設定，壞行被略過且不影響其他行
    let text = "A,0.2,1,0.4,4\nthis line is broken\nB,0.2,1,0.4,4\nC,0.2,oops,0.4,4\n";

    let mut registry = PrinterRegistry::new();
    let import = registry.import(text);
    assert_eq!(import.accepted_count(), 2);
    assert_eq!(import.rejected.len(), 2);
    assert_eq!(import.rejected[0].line_number, 2);
    assert_eq!(import.rejected[1].line_number, 4);

    let distribution = DistributionCalculator::distribute(8, registry.list()).unwrap();
    assert_eq!(distribution.units_for("A"), Some(4));
    assert_eq!(distribution.units_for("B"), Some(4));
    assert_eq!(distribution.units_for("C"), None);
}

#[test]
fn test_export_import_round_trip_preserves_order() {
    let registry = PrinterRegistry::from_printers(vec![
        printer("Z", Decimal::new(1, 1), Decimal::new(75, 2), Decimal::new(2, 1), 9),
        printer("A", Decimal::new(3, 1), Decimal::from(4), Decimal::new(8, 1), 1),
        printer("M", Decimal::ONE, Decimal::new(125, 2), Decimal::new(4, 1), 3),
    ])
    .unwrap();

    let mut restored = PrinterRegistry::new();
    let import = restored.import(&registry.export());

    assert!(import.is_clean());
    assert_eq!(restored, registry);
}

#[test]
fn test_cli_calculate_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let printers = dir.path().join("printers.txt");
    let params = dir.path().join("job.json");
    std::fs::write(&printers, "Solo,0.2,2,0.4,5\n").unwrap();
    std::fs::write(
        &params,
        r#"{"total_units": 3, "material_per_unit": "10", "material_cost_per_kg": "20",
            "energy_cost_per_kwh": "0.15", "commission_per_unit": "1"}"#,
    )
    .unwrap();

    // 以 --units 覆寫件數：10 件 → 與 report 單元測試相同的數字
    let text = cli::calculate(&printers, Some(&params), Some(10), false).unwrap();
    assert!(text.contains("Total Cost with Commission: $12.60"));

    let json = cli::calculate(&printers, Some(&params), None, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["distribution"]["allocations"][0]["units"], 3);
}

#[test]
fn test_cli_calculate_empty_printer_file() {
    let dir = tempfile::tempdir().unwrap();
    let printers = dir.path().join("printers.txt");
    std::fs::write(&printers, "").unwrap();

    let err = cli::calculate(&printers, None, Some(5), false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PrintCostError>(),
        Some(PrintCostError::EmptyRegistry)
    ));
}

#[test]
fn test_interactive_session_round_trip() {
    // 互動流程：新增兩台 → 設定參數 → 計算 → 匯出 → 移除 → 匯入 → 再計算
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("printers.txt");

    let script = concat!(
        "2\n1\nA\n0,2\n1\n0.4\n4\n",
        "2\n1\nB\n0.2\n1\n0.4\n4\n",
        "1\n8\n10\n0\n20\nno\n0.5\n",
        "3\n",
        "4\n",
        "2\n3\nA\n",
        "5\n",
        "2\n2\n",
        "6\n"
    );

    let mut session = Session::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
        .with_printers_file(file.clone());
    session.run().unwrap();

    assert_eq!(session.registry().len(), 2);
    assert_eq!(session.request().total_units, 8);

    let output = String::from_utf8(session.into_output()).unwrap();
    assert!(output.contains("A -> Units: 4"));
    assert!(output.contains("B -> Units: 4"));
    assert!(output.contains("Exported 2 printer(s)"));
    assert!(output.contains("Printer \"A\" removed."));
    assert!(output.contains("Imported 2 printer(s)"));
    assert!(output.contains("• A | 0.2 kW | 1 h/unit | 0.4 mm nozzle | 4 units/batch"));

    assert_eq!(
        std::fs::read_to_string(&file).unwrap(),
        "A,0.2,1,0.4,4\nB,0.2,1,0.4,4"
    );
}
