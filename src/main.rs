use anyhow::{Context, Result};
use learning_quiz::infrastructure::terminal::{self, MultiLineDraft, RedrawFlag, SessionAction};
use learning_quiz::quiz::EditorAction;
use learning_quiz::services::source_from_config;
use learning_quiz::utils::logging;
use learning_quiz::{
    logger, AnswerDecision, AnswerRecorder, AppResult, Config, QuizQuestionAdapter,
    SessionLoader,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);
    config.validate().context("配置校验失败")?;

    let source = source_from_config(&config).context("无法创建学习集来源")?;
    let source_desc = config
        .learning_set_api_url
        .clone()
        .unwrap_or_else(|| config.learning_set_dir.display().to_string());
    let loader = SessionLoader::new(source, &config);

    let catalog = loader
        .fetch_catalog()
        .await
        .context("获取学习集目录失败")?;
    logging::log_session_start(&source_desc, catalog.question_sets.len());

    let Some(first) = catalog.question_sets.first() else {
        warn!("⚠️ 没有找到可用的题集，程序结束");
        return Ok(());
    };
    let set_id = std::env::args().nth(1).unwrap_or_else(|| first.id.clone());

    let mut adapter = QuizQuestionAdapter::new(AnswerRecorder::new(&config));
    let redraw = RedrawFlag::new();
    adapter.register_observer(Box::new(redraw.clone()));
    adapter.set_show_hint(config.show_hint);

    let loaded = loader
        .load_learning_set(&mut adapter, &set_id)
        .await
        .with_context(|| format!("无法载入学习集 {}", set_id))?;

    println!("📚 {} ({} 道题目)", loaded.name, loaded.question_count);
    println!("命令: :hint 切换提示, :skip 跳过, :submit 提交多行答案, :quit 结束\n");

    run_session(&mut adapter, &redraw)
        .await
        .context("读取终端输入失败")?;

    logging::print_final_stats(
        &adapter.callback().stats(),
        adapter.user_answers().len(),
        adapter.item_count(),
        adapter.callback().answering_span(),
    );
    Ok(())
}

/// 逐题读取终端输入直到结束
async fn run_session(
    adapter: &mut QuizQuestionAdapter<AnswerRecorder>,
    redraw: &RedrawFlag,
) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut position = 0;
    let mut draft = MultiLineDraft::new();
    let mut needs_draw = true;

    while position < adapter.item_count() {
        if redraw.take() || needs_draw {
            print!(
                "{}",
                terminal::render_to_text(&adapter.render(position), adapter.item_count())
            );
            needs_draw = false;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let variant = adapter.item_variant(position);
        let input = terminal::parse_input(&line, variant);
        let decision = match terminal::route_input(input, variant, &mut draft) {
            SessionAction::Quit => break,
            SessionAction::Skip => {
                position += 1;
                needs_draw = true;
                continue;
            }
            SessionAction::ToggleHint => {
                adapter.set_show_hint(!adapter.show_hint());
                continue;
            }
            SessionAction::Buffered(_) => continue,
            SessionAction::Notice(message) => {
                println!("{}", message);
                continue;
            }
            SessionAction::SubmitText(text) => adapter.submit_text(position, &text),
            SessionAction::EditorDone(text) => {
                adapter.editor_action(position, EditorAction::Done, &text)
            }
            SessionAction::SelectChoice(slot) => adapter.select_choice(position, slot),
        };

        match decision {
            Some(AnswerDecision::Record) => {
                position += 1;
                needs_draw = true;
            }
            Some(AnswerDecision::Discard) => {
                println!("答案未被接受，请重新作答");
                needs_draw = true;
            }
            None => println!("当前题目不支持该操作"),
        }
    }

    Ok(())
}
